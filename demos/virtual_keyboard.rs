use std::thread::sleep;
use std::time::Duration;

use vinput::*;

// KEY_H, KEY_E, KEY_L, KEY_O from input-event-codes.h
const HELLO: [u16; 5] = [0x23, 0x12, 0x26, 0x26, 0x18];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let mut device = VirtualDevice::create("/dev/uinput", DeviceTemplates::keyboard())?;
    println!("Created device: {}", device.name());

    println!("Typing...");
    for code in HELLO {
        device.send_key(code, BTN_STATE_PRESSED)?;
        device.sync()?;
        sleep(Duration::from_millis(20));
        device.send_key(code, BTN_STATE_RELEASED)?;
        device.sync()?;
        sleep(Duration::from_millis(20));
    }

    device.destroy()?;
    println!("Done");
    Ok(())
}
