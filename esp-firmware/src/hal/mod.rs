// Hardware Abstraction Layer (HAL) Module
//
// Kapselt den Strip hinter dem SmartLedWriter Trait aus esp-core.

pub mod led_writer;

pub use led_writer::STRIP_OUTPUT;

#[cfg(not(test))]
pub use led_writer::RmtStripWriter;

#[cfg(test)]
pub use led_writer::MockStripWriter;
