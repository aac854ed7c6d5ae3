pub mod config;
pub mod error;
pub mod i18n;
pub mod invoice;
pub mod layout;
pub mod pdf;

pub use config::{Config, InvoiceFile, LineItem, Party};
pub use error::{InvoiceError, Result};
pub use i18n::{Catalog, Direction, Localizer};
pub use invoice::{compute, render_invoice, InvoiceInput, RenderedInvoice, Totals};
pub use layout::{layout, Document, StyleSet};
