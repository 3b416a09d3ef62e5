//! Link status as reported by the transport

/// Connection status of the wireless link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    /// Scan or GATT setup in progress
    Connecting,
    /// Subscribed to notifications; commands may be written
    Connected,
    /// Last connection attempt failed
    Failed,
}

impl ConnectionStatus {
    /// Check if commands may be written
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }

    /// Short status text for a display
    pub const fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "Disconnected",
            ConnectionStatus::Connecting => "Connecting...",
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Failed => "Connect failed",
        }
    }
}
