// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod gatt;
pub mod hal;
pub mod tasks;

// Re-exports von esp-core
pub use esp_core::{LedError, Parameters, Pattern, SmartLedWriter, StripEvents};

/// Geteilte Parameter zwischen Frame Loop und BLE Task
///
/// Nur Atomics: der BLE Task schreibt, der Frame Loop liest pro Frame.
pub static PARAMETERS: Parameters = Parameters::new();

// ============================================================================
// Testing-Strategie
// ============================================================================
//
// Dieses Crate kompiliert nur für riscv32imac-unknown-none-elf.
// Die komplette Logik (Patterns, Parameter, Parser, Output-Stufe) liegt
// daher in esp-core und wird auf dem Host getestet:
//
// - Unit Tests:        esp-core/src/*.rs (#[cfg(test)])
// - Integration Tests: esp-tests/tests/strip_tests.rs (MockStripWriter)
//
// Hier bleiben nur Hardware-Wrapper (RMT, BLE) und die Task-Verdrahtung.
