// BLE Task - GATT Server, Advertising und Verbindungs-Lebenszyklus
use bt_hci::param::Status;
use defmt::{Debug2Format, error, info, warn};
use embassy_futures::join::join;
use embassy_time::{Duration, Timer};
use esp_core::{AppliedUpdate, Endpoint, Parameters, StripEvents, UpdateError};
use esp_radio::ble::controller::BleConnector;
use trouble_host::prelude::*;

use crate::config::{
    BLE_ADDRESS, BLE_CONNECTIONS_MAX, BLE_DEVICE_NAME, BLE_HCI_SLOTS, BLE_L2CAP_CHANNELS_MAX,
    BLE_RETRY_DELAY_MS, STRIP_SERVICE_UUID,
};
use crate::gatt::StripServer;

/// HCI Controller über den ESP32-C6 Radio-Treiber
pub type StripController = ExternalController<BleConnector<'static>, BLE_HCI_SLOTS>;

/// BLE Task
///
/// - Baut den Host-Stack und den GATT Server auf
/// - Advertised den Strip-Service bis sich ein Client verbindet
/// - Leitet Writes an `Parameters::on_write()` weiter und schreibt das Echo zurück
/// - Advertised nach dem Disconnect erneut
#[embassy_executor::task]
pub async fn ble_task(connector: BleConnector<'static>, params: &'static Parameters) {
    info!("BLE: Starting host stack");

    let controller: StripController = ExternalController::new(connector);
    let mut resources: HostResources<
        DefaultPacketPool,
        BLE_CONNECTIONS_MAX,
        BLE_L2CAP_CHANNELS_MAX,
    > = HostResources::new();
    let stack =
        trouble_host::new(controller, &mut resources).set_random_address(Address::random(BLE_ADDRESS));
    let Host {
        mut peripheral,
        runner,
        ..
    } = stack.build();

    let server = match StripServer::new_default(BLE_DEVICE_NAME) {
        Ok(server) => server,
        Err(e) => {
            error!("BLE: Failed to create GATT server: {}", e);
            return;
        }
    };

    join(
        host_runner(runner),
        connection_loop(&mut peripheral, &server, params),
    )
    .await;
}

/// Treibt den Host-Stack (HCI Events, L2CAP, ATT)
async fn host_runner<C: Controller, P: PacketPool>(mut runner: Runner<'_, C, P>) {
    loop {
        if let Err(e) = runner.run().await {
            error!("BLE: Host runner failed: {}", Debug2Format(&e));
            Timer::after(Duration::from_millis(BLE_RETRY_DELAY_MS)).await;
        }
    }
}

/// Advertising → Verbindung → GATT Events → Disconnect → wieder von vorne
async fn connection_loop<'values, 'server, C: Controller>(
    peripheral: &mut Peripheral<'values, C, DefaultPacketPool>,
    server: &'server StripServer<'values>,
    params: &Parameters,
) {
    loop {
        info!("BLE: Advertising as '{}'", BLE_DEVICE_NAME);

        let conn = match advertise(BLE_DEVICE_NAME, peripheral, server).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("BLE: Advertising failed: {}", Debug2Format(&e));
                Timer::after(Duration::from_millis(BLE_RETRY_DELAY_MS)).await;
                continue;
            }
        };

        params.on_connect();
        info!("BLE: Client connected (#{})", params.connection_count());

        let reason = gatt_events(server, &conn, params).await;

        params.on_disconnect();
        info!("BLE: Client disconnected: {}", Debug2Format(&reason));
    }
}

/// Startet Connectable Advertising und wartet auf einen Client
async fn advertise<'values, 'server, C: Controller>(
    name: &'values str,
    peripheral: &mut Peripheral<'values, C, DefaultPacketPool>,
    server: &'server StripServer<'values>,
) -> Result<GattConnection<'values, 'server, DefaultPacketPool>, BleHostError<C::Error>> {
    let mut adv_data = [0; 31];
    let len = AdStructure::encode_slice(
        &[
            AdStructure::Flags(LE_GENERAL_DISCOVERABLE | BR_EDR_NOT_SUPPORTED),
            AdStructure::ServiceUuids16(&[STRIP_SERVICE_UUID.to_le_bytes()]),
            AdStructure::CompleteLocalName(name.as_bytes()),
        ],
        &mut adv_data[..],
    )?;

    let advertiser = peripheral
        .advertise(
            &Default::default(),
            Advertisement::ConnectableScannableUndirected {
                adv_data: &adv_data[..len],
                scan_data: &[],
            },
        )
        .await?;

    let conn = advertiser.accept().await?.with_attribute_server(server)?;
    Ok(conn)
}

/// Verarbeitet GATT Events bis zum Disconnect und gibt den Grund zurück
async fn gatt_events<P: PacketPool>(
    server: &StripServer<'_>,
    conn: &GattConnection<'_, '_, P>,
    params: &Parameters,
) -> Status {
    loop {
        match conn.next().await {
            GattConnectionEvent::Disconnected { reason } => return reason,
            GattConnectionEvent::Gatt { event } => {
                let update = match &event {
                    GattEvent::Write(write) => server
                        .endpoint_for(write.handle())
                        .map(|endpoint| (endpoint, params.on_write(endpoint, write.data()))),
                    _ => None,
                };

                match event.accept() {
                    Ok(reply) => reply.send().await,
                    Err(e) => warn!("BLE: Failed to send GATT reply: {}", Debug2Format(&e)),
                }

                // Echo erst nach dem Reply, sonst überschreibt der Stack den Wert
                if let Some((endpoint, result)) = update {
                    echo_update(server, endpoint, result);
                }
            }
            _ => {}
        }
    }
}

/// Loggt das Ergebnis eines Writes und legt das bereinigte Echo als Wert ab
fn echo_update(
    server: &StripServer<'_>,
    endpoint: Endpoint,
    result: Result<AppliedUpdate, UpdateError>,
) {
    match result {
        Ok(update) => {
            info!("BLE: {}", update);
            if let Err(e) = server.set(server.characteristic(endpoint), update.payload.as_padded()) {
                warn!("BLE: Failed to store echo for {}: {}", endpoint, Debug2Format(&e));
            }
        }
        Err(e) => warn!("BLE: {} write discarded: {}", endpoint, e),
    }
}
