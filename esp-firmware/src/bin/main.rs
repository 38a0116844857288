// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (BLE-Controller benötigt dynamischen Speicher)
extern crate alloc;

// Embassy Async Runtime
use defmt::info;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;
use esp_radio::ble::controller::BleConnector;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use esp_ble_strip::PARAMETERS;
use esp_ble_strip::config::{BLE_DEVICE_NAME, EXTRA_HEAP_SIZE, LED_COUNT, RADIO_HEAP_SIZE};
use esp_ble_strip::tasks::{ble_task, frame_loop_task};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware und Radio, startet Embassy Runtime und spawnt
/// Frame Loop + BLE Task. Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Heap Allocator initialisieren (BLE-Controller braucht dynamischen Speicher!)
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: RADIO_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    info!("Starting '{}' with {} LEDs", BLE_DEVICE_NAME, LED_COUNT);

    // Radio initialisieren (nur BLE, kein WiFi)
    static RADIO_INIT: static_cell::StaticCell<esp_radio::Controller> =
        static_cell::StaticCell::new();
    let radio_init = RADIO_INIT.init(esp_radio::init().expect("Failed to initialize radio"));

    let connector = BleConnector::new(radio_init, peripherals.BT, Default::default())
        .expect("Failed to initialize BLE controller");

    // Seed für Confetti aus dem Hardware RNG
    let rng = Rng::new();
    let seed = rng.random() as u16;

    // Spawn Frame Loop (liest PARAMETERS pro Frame)
    spawner
        .spawn(frame_loop_task(
            peripherals.GPIO5,
            peripherals.RMT,
            &PARAMETERS,
            seed,
        ))
        .unwrap();

    // Spawn BLE Task (schreibt PARAMETERS bei jedem Write)
    spawner.spawn(ble_task(connector, &PARAMETERS)).unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
