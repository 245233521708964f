//! Interface of the motion sensor feeding the polling loop

/// One reading of the sensor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub dx: i32,
    pub dy: i32,
    /// Raw button state code, see [`crate::button`]
    pub button_state: u8,
}

/// Part of a sample that couldn't be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleChannel {
    Dx,
    Dy,
    Button,
}

/// Errors of sample sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleError {
    /// Fetching a new sample from the sensor failed
    Fetch,
    /// Reading one channel of the fetched sample failed
    Channel(SampleChannel),
}

/// A sensor which reports relative motion and a button state.
pub trait SampleSource {
    /// Fetch the latest sample.
    async fn fetch(&mut self) -> Result<Sample, SampleError>;
}
