// Startup errors
//
// Every failure the shell can hit happens before the first tick. Once the
// main loop is running the only way out is a state transition.

/// Errors that can occur while bringing the emulator up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupError {
    /// The windowing subsystem (event loop) failed to start
    SubsystemInit(String),

    /// The window could not be created
    WindowCreate(String),

    /// The renderer could not be bound to the window
    RendererCreate(String),

    /// The machine context (cycle executor) failed to initialize
    MachineInit(String),
}

impl std::fmt::Display for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartupError::SubsystemInit(e) => {
                write!(f, "Could not initialize windowing subsystem: {}", e)
            }
            StartupError::WindowCreate(e) => write!(f, "Could not create window: {}", e),
            StartupError::RendererCreate(e) => write!(f, "Could not create renderer: {}", e),
            StartupError::MachineInit(e) => write!(f, "Could not initialize machine: {}", e),
        }
    }
}

impl std::error::Error for StartupError {}
