mod generator;
mod input;
mod totals;

pub use generator::{
    export_invoice, load_invoice, output_file_name, render_invoice, LoadedInvoice, OutputFormat,
    RenderedInvoice,
};
pub use input::InvoiceInput;
pub use totals::{compute, format_amount, format_number, Totals, MONEY_DECIMALS};
