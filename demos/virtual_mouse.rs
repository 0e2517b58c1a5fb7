use std::thread::sleep;
use std::time::Duration;

use vinput::uinput::{BTN_LEFT, REL_WHEEL, REL_X, REL_Y};
use vinput::*;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let mut device = VirtualDevice::create("/dev/uinput", DeviceTemplates::mouse())?;
    println!("Created device: {}", device.name());

    println!("Drawing a small square...");
    for (dx, dy) in [(40, 0), (0, 40), (-40, 0), (0, -40)] {
        device.send_rel(REL_X, dx)?;
        device.send_rel(REL_Y, dy)?;
        device.sync()?;
        sleep(Duration::from_millis(50));
    }

    println!("Click and scroll...");
    device.send_key(BTN_LEFT, BTN_STATE_PRESSED)?;
    device.sync()?;
    sleep(Duration::from_millis(50));
    device.send_key(BTN_LEFT, BTN_STATE_RELEASED)?;
    device.sync()?;

    device.send_rel(REL_WHEEL, -1)?;
    device.sync()?;

    device.destroy()?;
    println!("Done");
    Ok(())
}
