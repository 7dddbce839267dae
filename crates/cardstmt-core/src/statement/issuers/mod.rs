//! Built-in issuer parsers.

mod axis;
mod hdfc;
mod icici;
mod kotak;
mod sbi;

pub use axis::AxisParser;
pub use hdfc::HdfcParser;
pub use icici::IciciParser;
pub use kotak::KotakParser;
pub use sbi::SbiParser;

use super::StatementParser;

/// Built-in parsers in identification priority order.
pub fn builtin() -> Vec<Box<dyn StatementParser>> {
    vec![
        Box::new(HdfcParser),
        Box::new(IciciParser),
        Box::new(SbiParser),
        Box::new(AxisParser),
        Box::new(KotakParser),
    ]
}
