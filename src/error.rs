//! Error types for background initialization.
//!
//! Everything that can fail does so before the frame loop starts: event loop
//! creation, window creation, and GPU setup. Once the loop is running, the
//! only recoverable failure is a lost surface, handled in place by the
//! window driver.

use std::fmt;

/// Errors that can occur while bringing the background up.
#[derive(Debug)]
pub enum Error {
    /// Failed to create the window event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create the host window.
    WindowCreation(winit::error::OsError),
    /// Failed to create a rendering surface for the window.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create a GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            Error::WindowCreation(e) => write!(f, "Failed to create window: {}", e),
            Error::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            Error::NoAdapter => write!(
                f,
                "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."
            ),
            Error::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::EventLoop(e) => Some(e),
            Error::WindowCreation(e) => Some(e),
            Error::SurfaceCreation(e) => Some(e),
            Error::DeviceCreation(e) => Some(e),
            Error::NoAdapter => None,
        }
    }
}

impl From<winit::error::EventLoopError> for Error {
    fn from(e: winit::error::EventLoopError) -> Self {
        Error::EventLoop(e)
    }
}

impl From<winit::error::OsError> for Error {
    fn from(e: winit::error::OsError) -> Self {
        Error::WindowCreation(e)
    }
}

impl From<wgpu::CreateSurfaceError> for Error {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        Error::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for Error {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        Error::DeviceCreation(e)
    }
}
