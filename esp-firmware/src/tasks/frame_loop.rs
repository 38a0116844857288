// Frame Loop Task - rendert das aktive Pattern mit 120 FPS auf den Strip
use defmt::{error, info};
use embassy_time::{Duration, Instant, Timer};
use esp_core::{FrameLoop, Parameters, SmartLedWriter, frame_delay_ms};
use esp_hal_smartled::smart_led_buffer;

use crate::config::{FRAME_INTERVAL_MS, LED_COUNT, MAX_LEDS, RMT_CLOCK_MHZ};
use crate::hal::RmtStripWriter;

/// Frame Loop Logic - Testbare Logik ohne Hardware-Abhängigkeit
///
/// Pro Durchlauf:
/// - Pattern aus den Parametern lesen und in den Buffer rendern
/// - Buffer über den Writer ausgeben (Helligkeit + Strom-Budget)
/// - Bis zum nächsten Frame schlafen
/// - Hue alle 20 ms weiterdrehen
///
/// # Parameter
/// - `led`: Strip Writer (Hardware oder Mock)
/// - `params`: Geteilte Parameter, werden vom BLE Task geschrieben
/// - `seed`: Startwert für den Zufallsgenerator (Confetti)
pub async fn frame_loop_logic<L: SmartLedWriter>(
    mut led: L,
    params: &'static Parameters,
    seed: u16,
) -> ! {
    let mut frames: FrameLoop<MAX_LEDS> = FrameLoop::new(LED_COUNT, seed);
    let start = Instant::now();
    let mut write_failing = false;

    info!(
        "Frame loop: {} LEDs @ {} ms/frame, start pattern {}",
        LED_COUNT,
        FRAME_INTERVAL_MS,
        frames.current()
    );

    loop {
        let frame_start = Instant::now();

        if let Some(pattern) = frames.frame(params, millis_since(start)) {
            info!("Pattern changed: {}", pattern);
        }

        // Fehler nur beim Übergang loggen, sonst 120 Meldungen pro Sekunde
        match frames.show(&mut led, params) {
            Ok(()) if write_failing => {
                info!("Strip write recovered");
                write_failing = false;
            }
            Ok(()) => {}
            Err(e) if !write_failing => {
                error!("Strip write failed: {}", e);
                write_failing = true;
            }
            Err(_) => {}
        }

        let elapsed = frame_start.elapsed().as_millis() as u32;
        let delay = frame_delay_ms(elapsed, FRAME_INTERVAL_MS);
        Timer::after(Duration::from_millis(delay as u64)).await;

        frames.tick_hue(params, millis_since(start));
    }
}

fn millis_since(start: Instant) -> u32 {
    start.elapsed().as_millis() as u32
}

/// Frame Loop Task - Embassy Task für parallele Ausführung
///
/// Initialisiert RMT + Strip und ruft dann `frame_loop_logic()` auf.
///
/// # Parameter
/// - `data_pin`: GPIO5 für die Datenleitung
/// - `rmt_peripheral`: RMT Peripheral für präzises Timing
/// - `params`: Geteilte Parameter
/// - `seed`: Startwert für den Zufallsgenerator
#[embassy_executor::task]
pub async fn frame_loop_task(
    data_pin: esp_hal::peripherals::GPIO5<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    params: &'static Parameters,
    seed: u16,
) {
    // Pulse-Buffer für alle LEDs (24 Bits pro LED + Reset)
    let mut rmt_buffer = smart_led_buffer!(MAX_LEDS);

    let led = RmtStripWriter::new(data_pin, rmt_peripheral, RMT_CLOCK_MHZ, &mut rmt_buffer);

    frame_loop_logic(led, params, seed).await
}
