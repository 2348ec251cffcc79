/// Source decoding for letterpix: still images, animated GIFs, and the
/// pre-boxing upscale for small animated sources.

pub mod gif;
pub mod image;
pub mod rescale;
