use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::input::InputError;

/// Device-name aliases applied before kernel matching.
const DEVICE_ALIASES: &[(&str, &str)] = &[
    ("first person", "first-person narration"),
    ("second person", "second-person narration"),
    ("third person", "third-person limited"),
    ("third person omniscient", "third-person omniscient"),
    ("pov", "third-person limited"),
    ("fid", "free indirect discourse"),
];

const NAME_SUFFIXES: &[&str] = &["point of view", "pov", "narrative", "narration", "device", "technique"];

#[derive(Debug, Deserialize)]
struct KernelFile {
    #[serde(default)]
    micro_devices: Vec<KernelDeviceRaw>,
}

#[derive(Debug, Deserialize)]
struct KernelDeviceRaw {
    name: String,
    #[serde(default)]
    definition: String,
    #[serde(default)]
    pedagogical_function: Option<String>,
    #[serde(default)]
    function: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceEntry {
    pub name: String,
    pub definition: String,
    pub function: Option<String>,
}

/// Lookup table from device name to pedagogical-function description,
/// supplied by an external collaborator. The engine only relies on the
/// `lookup(key) -> Option<&str>` contract; a miss is recovered with generic
/// feedback, never an error.
#[derive(Debug, Default)]
pub struct DeviceKernel {
    devices: BTreeMap<String, DeviceEntry>,
    normalized: BTreeMap<String, String>,
}

impl DeviceKernel {
    pub fn load(path: &Path) -> Result<DeviceKernel, InputError> {
        let raw = std::fs::read_to_string(path)?;
        let parsed: KernelFile = serde_json::from_str(&raw).map_err(|source| InputError::Json {
            path: path.display().to_string(),
            source,
        })?;

        // `pedagogical_function` carries the description; `function` is a
        // legacy code field kept as a fallback. First instance of a name wins.
        let entries = parsed
            .micro_devices
            .into_iter()
            .map(|device| DeviceEntry {
                name: device.name,
                definition: device.definition,
                function: device.pedagogical_function.or(device.function),
            })
            .collect();
        let kernel = DeviceKernel::from_entries(entries);
        tracing::info!(devices = kernel.devices.len(), path = %path.display(), "kernel loaded");
        Ok(kernel)
    }

    /// Build a kernel from already-parsed entries; the loading mechanics are
    /// the collaborator's concern, only the lookup contract matters here.
    pub fn from_entries(entries: Vec<DeviceEntry>) -> DeviceKernel {
        let mut kernel = DeviceKernel::default();
        for entry in entries {
            let key = entry.name.to_lowercase();
            if kernel.devices.contains_key(&key) {
                continue;
            }
            kernel.normalized.insert(normalize_name(&entry.name), key.clone());
            kernel.devices.insert(key, entry);
        }
        kernel
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// The core lookup contract: pedagogical function by device name.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.devices
            .get(&key.to_lowercase())
            .and_then(|d| d.function.as_deref())
    }

    pub fn match_device(&self, student_name: &str) -> Option<(&DeviceEntry, f32)> {
        if self.devices.is_empty() {
            return None;
        }
        let name = apply_alias(student_name);
        let key = name.to_lowercase();
        if let Some(entry) = self.devices.get(&key) {
            return Some((entry, 1.0));
        }
        let norm = normalize_name(&name);
        if let Some(key) = self.normalized.get(&norm) {
            return self.devices.get(key).map(|e| (e, 0.95));
        }

        // word overlap against normalized kernel names
        let student_words: Vec<&str> = norm.split_whitespace().collect();
        if student_words.is_empty() {
            return None;
        }
        let mut best: Option<(&DeviceEntry, f32)> = None;
        for (kernel_norm, key) in &self.normalized {
            let kernel_words: Vec<&str> = kernel_norm.split_whitespace().collect();
            let overlap = student_words
                .iter()
                .filter(|w| kernel_words.contains(w))
                .count();
            if overlap < 2 {
                continue;
            }
            let ratio = overlap as f32 / student_words.len().max(kernel_words.len()) as f32;
            let confidence = ratio * 0.9;
            if best.is_none_or(|(_, c)| confidence > c) {
                best = self.devices.get(key).map(|e| (e, confidence));
            }
        }
        best.filter(|(_, c)| *c >= 0.5)
    }

    /// Identify which device the response analyzes, from extracted topics
    /// first and the text body second.
    pub fn identify(&self, text: &str, topics: &[String]) -> Option<&DeviceEntry> {
        if self.devices.is_empty() {
            return None;
        }

        for topic in topics.iter().filter(|t| t.len() >= 4) {
            if let Some((entry, confidence)) = self.match_device(topic) {
                if confidence >= 0.5 {
                    tracing::info!(device = %entry.name, topic = %topic, "device matched from topic");
                    return Some(entry);
                }
            }
        }

        for pair in topics.windows(2) {
            let combined = format!("{} {}", pair[0], pair[1]);
            if let Some((entry, confidence)) = self.match_device(&combined) {
                if confidence >= 0.7 {
                    tracing::info!(device = %entry.name, combined = %combined, "device matched from combined topics");
                    return Some(entry);
                }
            }
        }

        let lower = text.to_lowercase();
        for (key, entry) in &self.devices {
            if lower.contains(key) || lower.contains(&normalize_name(key)) {
                tracing::info!(device = %entry.name, "device matched in text body");
                return Some(entry);
            }
        }

        None
    }
}

fn apply_alias(name: &str) -> String {
    let norm = normalize_name(name);
    for (alias, canonical) in DEVICE_ALIASES {
        if norm == normalize_name(alias) {
            return (*canonical).to_string();
        }
    }
    name.to_string()
}

fn normalize_name(name: &str) -> String {
    let mut result = name.to_lowercase();
    for suffix in NAME_SUFFIXES {
        if let Some(stripped) = result.strip_suffix(suffix) {
            // a name that is nothing but the suffix stays as-is
            let stripped = stripped.trim();
            if !stripped.is_empty() {
                result = stripped.to_string();
            }
        }
    }
    result
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/kernel.rs"]
mod tests;
