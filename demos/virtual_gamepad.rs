use std::thread::sleep;
use std::time::Duration;

use vinput::uinput::{ABS_X, ABS_Y, BTN_SOUTH};
use vinput::*;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let mut device = VirtualDevice::create("/dev/uinput", DeviceTemplates::gamepad())?;
    println!("Created device: {}", device.name());
    println!("sysfs path: {}", device.sys_path()?.display());

    println!("Pressing south button...");
    device.send_key(BTN_SOUTH, BTN_STATE_PRESSED)?;
    device.sync()?;
    sleep(Duration::from_millis(100));
    device.send_key(BTN_SOUTH, BTN_STATE_RELEASED)?;
    device.sync()?;

    println!("Moving left stick...");
    device.send_abs(ABS_X, 16384)?;
    device.send_abs(ABS_Y, -16384)?;
    device.sync()?;
    sleep(Duration::from_millis(100));

    // Reset to center
    device.send_abs(ABS_X, 0)?;
    device.send_abs(ABS_Y, 0)?;
    device.sync()?;

    device.destroy()?;
    println!("Done");
    Ok(())
}
