use serde::Serialize;

use crate::error::TelemetryError;
use crate::platform::PlatformCapability;
use crate::report;

/// Facts only the host engine can see (window, GPU, memory, quality tier).
/// The host fills these in at capture time; defaults stay empty rather than
/// guessing.
#[derive(Debug, Clone, Default)]
pub struct HostFacts {
    pub resolution: String,
    pub device_model: String,
    pub graphics_device_name: String,
    pub system_memory_size: String,
    pub quality_setting: String,
}

/// Immutable record of host machine/runtime facts, captured once at
/// construction and serialized whole into the technical submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnvironmentSnapshot {
    pub resolution: String,
    pub operating_system: String,
    pub device_model: String,
    pub graphics_device_name: String,
    pub processor_type: String,
    pub processor_count: usize,
    pub system_memory_size: String,
    pub quality_setting: String,
    pub language: String,
    pub install_dir: String,
}

impl EnvironmentSnapshot {
    pub fn capture(host: &HostFacts, platform: &dyn PlatformCapability) -> Self {
        let mut language = locale_from_env();
        if let Some(country) = platform.country_code() {
            language = format!("{language} / {country}");
        }

        Self {
            resolution: host.resolution.clone(),
            operating_system: format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
            device_model: host.device_model.clone(),
            graphics_device_name: host.graphics_device_name.clone(),
            processor_type: std::env::consts::ARCH.to_string(),
            processor_count: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            system_memory_size: host.system_memory_size.clone(),
            quality_setting: host.quality_setting.clone(),
            language,
            install_dir: platform.install_dir().unwrap_or_default(),
        }
    }

    pub fn to_json(&self) -> Result<String, TelemetryError> {
        report::to_report_json(self)
    }
}

fn locale_from_env() -> String {
    std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_default()
}
