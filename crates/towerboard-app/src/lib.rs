// Library root: the score source seam, the one-shot loader, and the
// messages the loader sends to the front end.

pub mod loader;
pub mod protocol;
pub mod source;
