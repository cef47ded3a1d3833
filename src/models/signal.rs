use ansi_term::Colour;

/// Qualitative band for an RSSI or SNR reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalQuality {
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl SignalQuality {
    /// RSSI bands (dBm): excellent > -50, good -50..-70, fair -70..-85,
    /// poor -85..-100, very poor < -100. Boundaries fall into the better band.
    pub fn from_rssi(rssi: i32) -> Self {
        match rssi {
            r if r > -50 => Self::Excellent,
            r if r >= -70 => Self::Good,
            r if r >= -85 => Self::Fair,
            r if r >= -100 => Self::Poor,
            _ => Self::VeryPoor,
        }
    }

    /// SNR bands (dB): excellent > 10, good 5..10, fair 0..5, poor < 0.
    pub fn from_snr(snr: f64) -> Self {
        if snr > 10.0 {
            Self::Excellent
        } else if snr >= 5.0 {
            Self::Good
        } else if snr >= 0.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SignalQuality::Excellent => "excellent",
            SignalQuality::Good => "good",
            SignalQuality::Fair => "fair",
            SignalQuality::Poor => "poor",
            SignalQuality::VeryPoor => "very poor",
        }
    }

    pub fn colour(&self) -> Colour {
        match self {
            SignalQuality::Excellent => Colour::Green,
            SignalQuality::Good => Colour::Cyan,
            SignalQuality::Fair => Colour::Yellow,
            SignalQuality::Poor => Colour::Red,
            SignalQuality::VeryPoor => Colour::Purple,
        }
    }

    pub fn paint(&self) -> String {
        self.colour().paint(self.label()).to_string()
    }
}

/// "-63 dBm (good)" or "N/A".
pub fn describe_rssi(rssi: Option<i32>) -> String {
    match rssi {
        Some(r) => format!("{r} dBm ({})", SignalQuality::from_rssi(r).paint()),
        None => "N/A".to_string(),
    }
}

/// "7.25 dB (good)" or "N/A".
pub fn describe_snr(snr: Option<f64>) -> String {
    match snr {
        Some(s) => format!("{s} dB ({})", SignalQuality::from_snr(s).paint()),
        None => "N/A".to_string(),
    }
}
