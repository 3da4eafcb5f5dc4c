#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use tempfile::TempDir;

/// Two cards in the shape `pactl -f json list cards` prints.
pub const LISTING: &str = r#"[
  {
    "index": 0,
    "name": "alsa_card.pci-0000_00_1f.3",
    "driver": "module-alsa-card.c",
    "owner_module": "7",
    "properties": {
      "device.description": "Built-in Audio",
      "device.nick": "HDA Intel PCH",
      "device.product.name": "Cannon Lake PCH cAVS"
    },
    "profiles": {
      "output:analog-stereo": {"description": "Analog Stereo Output", "sinks": 1, "sources": 0, "priority": 6500, "available": true},
      "off": {"description": "Off", "sinks": 0, "sources": 0, "priority": 0, "available": true},
      "output:hdmi-stereo": {"description": "Digital Stereo (HDMI) Output", "sinks": 1, "sources": 0, "priority": 5900, "available": false}
    },
    "active_profile": "output:analog-stereo",
    "ports": {}
  },
  {
    "index": 3,
    "name": "alsa_card.usb-Logitech_USB_Headset",
    "driver": "module-alsa-card.c",
    "properties": {
      "device.description": "Logitech USB Headset",
      "device.product.name": "USB Headset"
    },
    "profiles": {
      "output:analog-stereo+input:mono-fallback": {"description": "Analog Stereo Output + Mono Input", "available": true},
      "off": {"description": "Off", "available": true}
    },
    "active_profile": "off",
    "ports": {}
  }
]"#;

const SCRIPT: &str = r#"#!/bin/sh
DIR=$(dirname "$0")
echo "$*" >> "$DIR/calls.log"
if [ "$1 $2 $3 $4" = "-f json list cards" ]; then
  if [ -f "$DIR/fail_list" ]; then
    cat "$DIR/fail_list" >&2
    exit 1
  fi
  cat "$DIR/listing.json"
  exit 0
fi
if [ "$1" = "set-card-profile" ]; then
  if [ -f "$DIR/fail_set" ]; then
    cat "$DIR/fail_set" >&2
    exit 1
  fi
  echo "$2 $3" >> "$DIR/applied.log"
  exit 0
fi
echo "unknown invocation: $*" >&2
exit 2
"#;

/// A stand-in `pactl` executable living in its own temp directory.
pub struct FakePactl {
    dir: TempDir,
    pub program: PathBuf,
}

impl FakePactl {
    pub fn new(listing: &str) -> Self {
        let dir = tempfile::tempdir().expect("create fake pactl dir");
        let program = dir.path().join("pactl");
        fs::write(&program, SCRIPT).expect("write fake pactl");
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755))
            .expect("make fake pactl executable");
        let fake = Self { dir, program };
        fake.set_listing(listing);
        fake
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn set_listing(&self, listing: &str) {
        fs::write(self.dir().join("listing.json"), listing).expect("write listing");
    }

    pub fn fail_list(&self, stderr: &str) {
        fs::write(self.dir().join("fail_list"), stderr).expect("write fail_list");
    }

    pub fn fail_set(&self, stderr: &str) {
        fs::write(self.dir().join("fail_set"), stderr).expect("write fail_set");
    }

    /// `CARD PROFILE` pairs passed to successful `set-card-profile` calls.
    pub fn applied(&self) -> Vec<String> {
        read_lines(&self.dir().join("applied.log"))
    }

    /// Raw argument lines of every invocation.
    pub fn calls(&self) -> Vec<String> {
        read_lines(&self.dir().join("calls.log"))
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .map(|s| s.lines().map(str::to_owned).collect())
        .unwrap_or_default()
}

#[cfg(feature = "cli")]
pub struct CmdResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

#[cfg(feature = "cli")]
/// Run the `aps` binary with a private HOME and no inherited `APS_*` overrides.
pub fn run_aps(home: &Path, args: &[&str]) -> CmdResult {
    let output = Command::new(env!("CARGO_BIN_EXE_aps"))
        .args(args)
        .env("HOME", home)
        .env_remove("APS_PACTL_PROGRAM")
        .env_remove("APS_UI_POLL_INTERVAL_MS")
        .env_remove("APS_LOGGING_ENABLED")
        .env_remove("APS_ACTIVITY_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("execute aps command");

    CmdResult {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
