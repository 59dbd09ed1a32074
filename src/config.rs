//! Package size ceilings
//!
//! The built-in table lists every package configuration the release pipeline
//! measures. A JSON file with the same shape replaces it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::model::{Flavor, LookupPath, PackageFormat};

/// Size ceiling for one package configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    pub arch: String,
    pub flavor: Flavor,
    pub os: PackageFormat,
    pub max_size: u64,
}

impl Threshold {
    fn new(arch: &str, flavor: Flavor, os: PackageFormat, max_size: u64) -> Self {
        Self { arch: arch.to_string(), flavor, os, max_size }
    }

    pub fn lookup_path(&self) -> LookupPath {
        LookupPath::new(self.arch.clone(), self.flavor, self.os)
    }
}

const AGENT_MAX: u64 = 140_000_000;
const HEROKU_AGENT_MAX: u64 = 70_000_000;
const SMALL_MAX: u64 = 10_000_000;

pub fn default_thresholds() -> Vec<Threshold> {
    use Flavor::*;
    use PackageFormat::*;

    vec![
        Threshold::new("amd64", Agent, Deb, AGENT_MAX),
        Threshold::new("amd64", IotAgent, Deb, SMALL_MAX),
        Threshold::new("amd64", Dogstatsd, Deb, SMALL_MAX),
        Threshold::new("amd64", HerokuAgent, Deb, HEROKU_AGENT_MAX),
        Threshold::new("x86_64", Agent, Rpm, AGENT_MAX),
        Threshold::new("x86_64", IotAgent, Rpm, SMALL_MAX),
        Threshold::new("x86_64", Dogstatsd, Rpm, SMALL_MAX),
        Threshold::new("x86_64", Agent, Suse, AGENT_MAX),
        Threshold::new("x86_64", IotAgent, Suse, SMALL_MAX),
        Threshold::new("x86_64", Dogstatsd, Suse, SMALL_MAX),
        Threshold::new("arm64", Agent, Deb, AGENT_MAX),
        Threshold::new("arm64", IotAgent, Deb, SMALL_MAX),
        Threshold::new("arm64", Dogstatsd, Deb, SMALL_MAX),
        Threshold::new("aarch64", Agent, Rpm, AGENT_MAX),
        Threshold::new("aarch64", IotAgent, Rpm, SMALL_MAX),
    ]
}

/// Load a threshold table from JSON, or the built-in one when `path` is `None`
pub fn load_thresholds(path: Option<&Path>) -> Result<Vec<Threshold>> {
    let Some(path) = path else {
        return Ok(default_thresholds());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Could not read thresholds: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid thresholds: {}", path.display()))
}
