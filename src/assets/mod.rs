pub mod artwork;
pub mod color;
pub mod decode;
pub mod fonts;
