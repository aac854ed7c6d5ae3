mod typst;

pub use typst::{generate_pdf, to_typst, to_typst_with};
