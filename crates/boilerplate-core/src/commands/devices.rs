//! `devices`: list connected Android devices, iOS devices and booted simulators

use crate::output;
use crate::runtime::{run_captured, tool};
use anyhow::Result;
use colored::Colorize;
use regex::Regex;
use std::sync::LazyLock;

/// Arguments for the devices command
#[derive(Debug, Clone, Default)]
pub struct DevicesArgs {
    pub details: bool,
    pub android: bool,
    pub ios: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub id: String,
    pub status: String,
    /// Hardware identifier when the listing exposes one
    pub udid: Option<String>,
    /// Labelled detail values, in display order
    pub details: Vec<(&'static str, String)>,
}

impl DeviceInfo {
    fn new(id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
            udid: None,
            details: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IosDevices {
    pub physical: Vec<DeviceInfo>,
    pub simulators: Vec<DeviceInfo>,
}

static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(.*\)\s*").expect("valid regex"));

static LAST_PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]+)\)\s*$").expect("valid regex"));

/// Parse `adb devices` output into id/status pairs
pub fn parse_adb_devices(output: &str) -> Vec<DeviceInfo> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.contains("List of devices"))
        .filter_map(|line| {
            let mut parts = line.trim().split('\t');
            let id = parts.next()?;
            let status = parts.next()?;
            Some(DeviceInfo::new(id, status))
        })
        .collect()
}

/// Strip parenthesised parts: `iPhone 15 (17.2) (UDID)` -> `iPhone 15`
fn clean_device_line(line: &str) -> String {
    PARENTHESIZED.replace_all(line, "").trim().to_string()
}

/// Parse physical devices from `xcrun xctrace list devices`
pub fn parse_xctrace_devices(output: &str) -> Vec<DeviceInfo> {
    output
        .lines()
        .filter(|line| {
            !line.trim().is_empty()
                && !line.contains("Devices")
                && !line.contains("==")
                && !line.contains("macOS")
                && !line.contains("Simulator")
        })
        .filter_map(|line| {
            let name = clean_device_line(line);
            if name.is_empty() {
                return None;
            }
            let mut device = DeviceInfo::new(name, "connected");
            device.udid = LAST_PARENTHESIZED
                .captures(line)
                .map(|caps| caps[1].to_string());
            Some(device)
        })
        .collect()
}

/// Parse booted simulators from `xcrun simctl list devices`
pub fn parse_booted_simulators(output: &str) -> Vec<DeviceInfo> {
    output
        .lines()
        .filter(|line| line.contains("Booted"))
        .map(clean_device_line)
        .filter(|name| !name.is_empty())
        .map(|name| DeviceInfo::new(name, "booted"))
        .collect()
}

const ANDROID_PROPS: &[(&str, &str)] = &[
    ("Model", "ro.product.model"),
    ("Android", "ro.build.version.release"),
    ("API Level", "ro.build.version.sdk"),
    ("Brand", "ro.product.brand"),
    ("Device", "ro.product.device"),
];

const IOS_KEYS: &[(&str, &str)] = &[
    ("Product Name", "ProductName"),
    ("iOS Version", "ProductVersion"),
    ("Device Name", "DeviceName"),
    ("Model", "DeviceClass"),
    ("Hardware", "HardwareModel"),
];

async fn android_details(id: &str) -> Result<Vec<(&'static str, String)>> {
    let mut details = Vec::new();
    for (label, prop) in ANDROID_PROPS {
        let value = run_captured("adb", &["-s", id, "shell", "getprop", prop], None).await?;
        details.push((*label, value.trim().to_string()));
    }
    Ok(details)
}

async fn ios_details(udid: &str) -> Result<Vec<(&'static str, String)>> {
    let mut details = Vec::new();
    for (label, key) in IOS_KEYS {
        let value = run_captured("ideviceinfo", &["-u", udid, "-k", key], None).await?;
        details.push((*label, value.trim().to_string()));
    }
    Ok(details)
}

pub async fn list_android_devices(show_details: bool) -> Vec<DeviceInfo> {
    let adb = tool::adb_tool();
    if let Err(e) = adb.require() {
        output::error(&e.to_string());
        return Vec::new();
    }

    if run_captured("adb", &["start-server"], None).await.is_err() {
        output::error("Failed to list Android devices");
        return Vec::new();
    }

    let mut devices = match run_captured("adb", &["devices"], None).await {
        Ok(out) => parse_adb_devices(&out),
        Err(_) => {
            output::error("Failed to list Android devices");
            return Vec::new();
        }
    };

    if show_details {
        for device in devices.iter_mut().filter(|d| d.status == "device") {
            // Devices that refuse getprop are listed without details
            if let Ok(details) = android_details(&device.id).await {
                device.details = details;
            }
        }
    }

    devices
}

pub async fn list_ios_devices(show_details: bool) -> IosDevices {
    let xcrun = tool::xcrun_tool();
    if let Err(e) = xcrun.require() {
        output::error(&e.to_string());
        return IosDevices::default();
    }

    let physical = run_captured("xcrun", &["xctrace", "list", "devices"], None)
        .await
        .map(|out| parse_xctrace_devices(&out))
        .unwrap_or_default();

    let simulators = run_captured("xcrun", &["simctl", "list", "devices"], None)
        .await
        .map(|out| parse_booted_simulators(&out))
        .unwrap_or_default();

    let mut devices = IosDevices {
        physical,
        simulators,
    };

    if show_details && !devices.physical.is_empty() && tool::ideviceinfo_tool().is_installed() {
        let ids = run_captured("idevice_id", &["-l"], None)
            .await
            .unwrap_or_default();
        for udid in ids.lines().map(str::trim).filter(|id| !id.is_empty()) {
            let Some(device) = devices
                .physical
                .iter_mut()
                .find(|d| d.udid.as_deref() == Some(udid))
            else {
                continue;
            };
            if let Ok(details) = ios_details(udid).await {
                device.details = details;
            }
        }
    }

    devices
}

fn print_details(device: &DeviceInfo) {
    let width = device
        .details
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    for (label, value) in &device.details {
        output::gray(&format!("  • {:<width$} {}", format!("{}:", label), value, width = width + 1));
    }
    println!();
}

pub fn print_android_devices(devices: &[DeviceInfo], show_details: bool) {
    output::banner("CONNECTED ANDROID DEVICES");

    if devices.is_empty() {
        output::warning("No Android devices connected.");
        return;
    }

    println!("{:<31} STATUS", "DEVICE ID");
    output::separator();

    for device in devices {
        let status = if device.status == "device" {
            device.status.green()
        } else {
            device.status.yellow()
        };
        println!("{} {}", format!("{:<30}", device.id).cyan(), status);

        if show_details && !device.details.is_empty() {
            print_details(device);
        }
    }
}

pub fn print_ios_devices(devices: &IosDevices, show_details: bool) {
    output::banner("CONNECTED IOS DEVICES");

    if devices.physical.is_empty() && devices.simulators.is_empty() {
        output::warning("No iOS devices or simulators detected.");
        return;
    }

    if !devices.physical.is_empty() {
        println!("PHYSICAL DEVICES");
        output::separator();
        for device in &devices.physical {
            println!("{}", device.id.cyan());
            if show_details && !device.details.is_empty() {
                print_details(device);
            }
        }
    }

    if !devices.simulators.is_empty() {
        println!("RUNNING SIMULATORS");
        output::separator();
        for device in &devices.simulators {
            println!("{}", device.id.cyan());
        }
    }

    if show_details && !devices.physical.is_empty() && !tool::ideviceinfo_tool().is_installed() {
        output::warning("\nFor detailed device information, install libimobiledevice:");
        println!("  brew install libimobiledevice");
    }
}

/// Run the devices workflow
pub async fn run(args: DevicesArgs) -> Result<()> {
    output::header("Device Manager\n");

    if args.android {
        let android = list_android_devices(args.details).await;
        print_android_devices(&android, args.details);
    } else if args.ios {
        let ios = list_ios_devices(args.details).await;
        print_ios_devices(&ios, args.details);
    } else {
        let android = list_android_devices(args.details).await;
        let ios = list_ios_devices(args.details).await;
        print_android_devices(&android, args.details);
        println!();
        print_ios_devices(&ios, args.details);
    }

    if args.details {
        output::gray("\nTip: Run without --details flag for a quick overview");
    } else {
        output::gray("\nTip: Use --details flag for more information");
    }

    Ok(())
}
