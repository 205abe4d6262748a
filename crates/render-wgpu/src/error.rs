/// Errors from GPU initialization.
///
/// The pattern generator itself is total; the only failure surface is the
/// rendering layer failing to come up (no adapter, device request denied,
/// surface creation rejected). Callers should log these and fall back to
/// exiting cleanly rather than panicking mid-frame.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to acquire GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("failed to create rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
}
