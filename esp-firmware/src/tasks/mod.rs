// Task-Modul: Enthält alle Embassy Tasks
//
// Frame Loop und BLE Task laufen unabhängig voneinander.
// Sie teilen sich nur die Parameters (Atomics, kein Lock).

pub mod ble;
pub mod frame_loop;

// Re-export Tasks für einfachen Import
pub use ble::ble_task;
pub use frame_loop::frame_loop_task;
