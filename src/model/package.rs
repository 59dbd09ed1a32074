use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::SizeError;

/// A binary shipped inside a package, relative to the extraction root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedBinary {
    pub name: &'static str,
    pub path: &'static str,
}

const AGENT_BINARIES: &[ScannedBinary] = &[
    ScannedBinary { name: "agent", path: "opt/datadog-agent/bin/agent/agent" },
    ScannedBinary { name: "process-agent", path: "opt/datadog-agent/embedded/bin/process-agent" },
    ScannedBinary { name: "trace-agent", path: "opt/datadog-agent/embedded/bin/trace-agent" },
    ScannedBinary { name: "security-agent", path: "opt/datadog-agent/embedded/bin/security-agent" },
    ScannedBinary { name: "system-probe", path: "opt/datadog-agent/embedded/bin/system-probe" },
];

const IOT_AGENT_BINARIES: &[ScannedBinary] = &[
    ScannedBinary { name: "agent", path: "opt/datadog-agent/bin/agent/agent" },
];

const HEROKU_AGENT_BINARIES: &[ScannedBinary] = &[
    ScannedBinary { name: "agent", path: "opt/datadog-agent/bin/agent/agent" },
    ScannedBinary { name: "process-agent", path: "opt/datadog-agent/embedded/bin/process-agent" },
    ScannedBinary { name: "trace-agent", path: "opt/datadog-agent/embedded/bin/trace-agent" },
];

const DOGSTATSD_BINARIES: &[ScannedBinary] = &[
    ScannedBinary { name: "dogstatsd", path: "opt/datadog-dogstatsd/bin/dogstatsd" },
];

/// Package distribution variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flavor {
    #[serde(rename = "datadog-agent", alias = "agent")]
    Agent,
    #[serde(rename = "datadog-iot-agent", alias = "iot-agent")]
    IotAgent,
    #[serde(rename = "datadog-heroku-agent", alias = "heroku-agent")]
    HerokuAgent,
    #[serde(rename = "datadog-dogstatsd", alias = "dogstatsd")]
    Dogstatsd,
}

impl Flavor {
    pub const ALL: [Flavor; 4] = [
        Flavor::Agent,
        Flavor::IotAgent,
        Flavor::HerokuAgent,
        Flavor::Dogstatsd,
    ];

    /// Name of the package as it appears in artifact file names and the size store
    pub fn package_name(self) -> &'static str {
        match self {
            Flavor::Agent => "datadog-agent",
            Flavor::IotAgent => "datadog-iot-agent",
            Flavor::HerokuAgent => "datadog-heroku-agent",
            Flavor::Dogstatsd => "datadog-dogstatsd",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Flavor::Agent => "agent",
            Flavor::IotAgent => "iot-agent",
            Flavor::HerokuAgent => "heroku-agent",
            Flavor::Dogstatsd => "dogstatsd",
        }
    }

    /// Binaries measured individually, in reporting order
    pub fn binaries(self) -> &'static [ScannedBinary] {
        match self {
            Flavor::Agent => AGENT_BINARIES,
            Flavor::IotAgent => IOT_AGENT_BINARIES,
            Flavor::HerokuAgent => HEROKU_AGENT_BINARIES,
            Flavor::Dogstatsd => DOGSTATSD_BINARIES,
        }
    }
}

impl FromStr for Flavor {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Flavor::ALL
            .into_iter()
            .find(|f| f.package_name() == s || f.short_name() == s)
            .ok_or_else(|| SizeError::UnknownFlavor(s.to_string()))
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.package_name())
    }
}

/// Packaging format, doubling as the OS family key in the size store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageFormat {
    Deb,
    Rpm,
    Suse,
}

impl PackageFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            PackageFormat::Deb => "deb",
            PackageFormat::Rpm => "rpm",
            PackageFormat::Suse => "suse",
        }
    }

    /// Environment variable naming the artifact directory for this format
    pub fn package_dir_var(self) -> &'static str {
        match self {
            PackageFormat::Suse => "OMNIBUS_PACKAGE_DIR_SUSE",
            PackageFormat::Deb | PackageFormat::Rpm => "OMNIBUS_PACKAGE_DIR",
        }
    }

    /// Shell pipeline printing the installed size of a package
    pub fn inspect_command(self, package: &Path) -> String {
        match self {
            PackageFormat::Deb => format!(
                "dpkg-deb --info {} | grep Installed-Size | cut -d : -f 2 | xargs",
                package.display()
            ),
            PackageFormat::Rpm | PackageFormat::Suse => format!(
                "rpm -qip {} | grep Size | cut -d : -f 2 | xargs",
                package.display()
            ),
        }
    }

    /// Normalize the inspection output unit to bytes (dpkg reports KiB);
    /// `None` when the value does not fit in a u64
    pub fn to_bytes(self, raw: u64) -> Option<u64> {
        match self {
            PackageFormat::Deb => raw.checked_mul(1024),
            PackageFormat::Rpm | PackageFormat::Suse => Some(raw),
        }
    }

    /// Shell pipeline unpacking a package into `dir`
    pub fn extract_command(self, package: &Path, dir: &Path) -> String {
        match self {
            PackageFormat::Deb => format!(
                "dpkg -x {} {} > /dev/null",
                package.display(),
                dir.display()
            ),
            PackageFormat::Rpm | PackageFormat::Suse => format!(
                "cd {} && rpm2cpio {} | cpio -idm > /dev/null",
                dir.display(),
                package.display()
            ),
        }
    }

    /// Glob over artifact file names for a flavor and architecture
    pub fn artifact_pattern(self, flavor: Flavor, arch: &str) -> String {
        let name = flavor.package_name();
        match self {
            PackageFormat::Deb => format!("{name}_7*_{arch}.deb"),
            PackageFormat::Rpm | PackageFormat::Suse => format!("{name}-7*{arch}.rpm"),
        }
    }
}

impl FromStr for PackageFormat {
    type Err = SizeError;

    /// Accepts format names as well as the OS family names used by release jobs
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deb" | "debian" => Ok(PackageFormat::Deb),
            "rpm" | "centos" => Ok(PackageFormat::Rpm),
            "suse" => Ok(PackageFormat::Suse),
            other => Err(SizeError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for PackageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The (architecture, flavor, OS family) triple indexing size history
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupPath {
    pub arch: String,
    pub flavor: Flavor,
    pub format: PackageFormat,
}

impl LookupPath {
    pub fn new(arch: impl Into<String>, flavor: Flavor, format: PackageFormat) -> Self {
        Self { arch: arch.into(), flavor, format }
    }
}

impl fmt::Display for LookupPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.flavor, self.arch, self.format)
    }
}
