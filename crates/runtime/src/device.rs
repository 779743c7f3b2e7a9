//! Compute device selection.
//!
//! Picks a GPU when one is available and compiled in, otherwise CPU:
//! CUDA (NVIDIA) → Metal (Apple Silicon) → CPU.

use candle_core::Device;
use tracing::{info, warn};

use tts_core::{TtsError, TtsResult};

/// Device preference for model loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DevicePreference {
    /// Automatically select the best available device.
    #[default]
    Auto,
    /// Force CPU usage.
    Cpu,
    /// Force CUDA GPU (NVIDIA).
    Cuda,
    /// Force Metal GPU (Apple Silicon).
    Metal,
}

impl DevicePreference {
    /// Parse from string (for CLI/config).
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "cpu" => Self::Cpu,
            "cuda" | "gpu" | "nvidia" => Self::Cuda,
            "metal" | "mps" | "apple" => Self::Metal,
            _ => Self::Auto,
        }
    }
}

/// Select a device based on preference and compiled features.
pub fn select_device(preference: DevicePreference) -> TtsResult<Device> {
    match preference {
        DevicePreference::Cpu => {
            info!("Using CPU device (forced)");
            Ok(Device::Cpu)
        }
        DevicePreference::Cuda => select_cuda(),
        DevicePreference::Metal => select_metal(),
        DevicePreference::Auto => select_auto(),
    }
}

fn select_auto() -> TtsResult<Device> {
    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(0) {
            Ok(device) => {
                info!("Auto-selected CUDA GPU");
                return Ok(device);
            }
            Err(e) => {
                warn!("CUDA GPU not available: {}", e);
            }
        }
    }

    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(device) => {
                info!("Auto-selected Metal GPU");
                return Ok(device);
            }
            Err(e) => {
                warn!("Metal GPU not available: {}", e);
            }
        }
    }

    info!("Using CPU device (no GPU available)");
    Ok(Device::Cpu)
}

#[allow(unused_variables)]
fn select_cuda() -> TtsResult<Device> {
    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(0) {
            Ok(device) => {
                info!("Using CUDA GPU");
                Ok(device)
            }
            Err(e) => Err(TtsError::device(format!(
                "CUDA GPU requested but not available: {e}"
            ))),
        }
    }

    #[cfg(not(feature = "cuda"))]
    {
        Err(TtsError::device(
            "CUDA GPU requested but 'cuda' feature not enabled. \
             Rebuild with: cargo build --features cuda",
        ))
    }
}

#[allow(unused_variables)]
fn select_metal() -> TtsResult<Device> {
    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(device) => {
                info!("Using Metal GPU");
                Ok(device)
            }
            Err(e) => Err(TtsError::device(format!(
                "Metal GPU requested but not available: {e}"
            ))),
        }
    }

    #[cfg(not(feature = "metal"))]
    {
        Err(TtsError::device(
            "Metal GPU requested but 'metal' feature not enabled. \
             Rebuild with: cargo build --features metal",
        ))
    }
}

/// Device name for logging/display.
pub fn device_name(device: &Device) -> &'static str {
    match device {
        Device::Cpu => "CPU",
        Device::Cuda(_) => "CUDA GPU",
        Device::Metal(_) => "Metal GPU",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_parse() {
        assert_eq!(DevicePreference::parse("cpu"), DevicePreference::Cpu);
        assert_eq!(DevicePreference::parse("CPU"), DevicePreference::Cpu);
        assert_eq!(DevicePreference::parse("cuda"), DevicePreference::Cuda);
        assert_eq!(DevicePreference::parse("gpu"), DevicePreference::Cuda);
        assert_eq!(DevicePreference::parse("mps"), DevicePreference::Metal);
        assert_eq!(DevicePreference::parse("auto"), DevicePreference::Auto);
        assert_eq!(DevicePreference::parse("unknown"), DevicePreference::Auto);
    }

    #[test]
    fn test_select_cpu() {
        let device = select_device(DevicePreference::Cpu).unwrap();
        assert!(matches!(device, Device::Cpu));
        assert_eq!(device_name(&device), "CPU");
    }

    #[test]
    fn test_select_auto_never_fails() {
        // Auto falls back to CPU when no GPU is compiled in or present.
        assert!(select_device(DevicePreference::Auto).is_ok());
    }
}
