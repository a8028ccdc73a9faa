use std::fmt;

/// Version information for the RHD file.
///
/// Contains major and minor version numbers for the file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    /// Major version number
    pub major: i32,
    /// Minor version number
    pub minor: i32,
}

impl Version {
    /// True when this version is `major.minor` or later.
    pub fn at_least(&self, major: i32, minor: i32) -> bool {
        *self >= Version { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Notes stored in the RHD file.
///
/// Intan recording software allows up to three notes to be stored with each recording.
#[derive(Debug, Clone, Default)]
pub struct Notes {
    /// First note text
    pub note1: String,
    /// Second note text
    pub note2: String,
    /// Third note text
    pub note3: String,
}

/// Frequency parameters for the recording.
///
/// Includes both the originally requested values ("desired_*") and the actual
/// values that were achieved by the hardware ("actual_*"), plus the derived
/// per-stream sample rates.
#[derive(Debug, Clone, Default)]
pub struct FrequencyParameters {
    /// Sample rate for amplifier channels (Hz)
    pub amplifier_sample_rate: f32,
    /// Sample rate for auxiliary input channels (Hz), a quarter of the amplifier rate
    pub aux_input_sample_rate: f32,
    /// Sample rate for supply voltage channels (Hz), one sample per data block
    pub supply_voltage_sample_rate: f32,
    /// Sample rate for board ADC channels (Hz)
    pub board_adc_sample_rate: f32,
    /// Sample rate for digital input channels (Hz)
    pub board_dig_in_sample_rate: f32,
    /// Whether DSP was enabled (1) or disabled (0)
    pub dsp_enabled: i32,
    /// User-requested DSP cutoff frequency (Hz)
    pub desired_dsp_cutoff_frequency: f32,
    /// Actual DSP cutoff frequency achieved (Hz)
    pub actual_dsp_cutoff_frequency: f32,
    /// User-requested lower bandwidth (Hz)
    pub desired_lower_bandwidth: f32,
    /// Actual lower bandwidth achieved (Hz)
    pub actual_lower_bandwidth: f32,
    /// User-requested upper bandwidth (Hz)
    pub desired_upper_bandwidth: f32,
    /// Actual upper bandwidth achieved (Hz)
    pub actual_upper_bandwidth: f32,
    /// Notch filter frequency (50Hz, 60Hz, or None)
    pub notch_filter_frequency: Option<i32>,
    /// User-requested impedance test frequency (Hz)
    pub desired_impedance_test_frequency: f32,
    /// Actual impedance test frequency achieved (Hz)
    pub actual_impedance_test_frequency: f32,
}

/// Information about an individual channel.
///
/// Contains naming, ordering, and hardware configuration for a single recording channel.
#[derive(Debug, Clone, Default)]
pub struct ChannelInfo {
    /// Name of the port (e.g., "Port A")
    pub port_name: String,
    /// Prefix for the port (e.g., "A")
    pub port_prefix: String,
    /// Default channel name assigned by the system (e.g., "A-000")
    pub native_channel_name: String,
    /// User-defined custom name for the channel
    pub custom_channel_name: String,
    /// Original order in the native system
    pub native_order: i32,
    /// Custom order (often used for display purposes)
    pub custom_order: i32,
    /// Channel on the chip
    pub chip_channel: i32,
    /// Hardware stream on the board
    pub board_stream: i32,
    /// Measured electrode impedance magnitude (Ω)
    pub electrode_impedance_magnitude: f32,
    /// Measured electrode impedance phase (radians)
    pub electrode_impedance_phase: f32,
}

/// Spike trigger configuration for one amplifier channel.
#[derive(Debug, Clone, Default)]
pub struct SpikeTrigger {
    /// Voltage trigger mode
    /// - 0: Trigger on digital input
    /// - 1: Trigger on voltage threshold
    pub voltage_trigger_mode: i32,
    /// Voltage threshold for triggering (μV)
    pub voltage_threshold: i32,
    /// Digital input channel to use for triggering
    pub digital_trigger_channel: i32,
    /// Digital edge polarity for trigger
    /// - 0: Trigger on falling edge
    /// - 1: Trigger on rising edge
    pub digital_edge_polarity: i32,
}

/// Header information from the RHD file.
///
/// Contains the metadata and channel configuration of one recording file,
/// plus the data-section geometry computed from the file size.
#[derive(Debug, Clone, Default)]
pub struct RhdHeader {
    /// File format version
    pub version: Version,
    /// Amplifier sample rate of the recording (Hz)
    pub sample_rate: f32,
    /// Number of samples per data block (60 before version 3.0, 128 after)
    pub num_samples_per_data_block: usize,
    /// Consolidated frequency and filter settings
    pub frequency_parameters: FrequencyParameters,
    /// User notes saved with the recording
    pub notes: Notes,
    /// Number of temperature sensor channels stored in each data block
    pub num_temp_sensor_channels: usize,
    /// Evaluation board mode; selects the board ADC scaling
    pub eval_board_mode: i32,
    /// Name of the reference channel used
    pub reference_channel: String,

    /// List of amplifier channels in the recording
    pub amplifier_channels: Vec<ChannelInfo>,
    /// List of spike trigger configurations (one per amplifier channel)
    pub spike_triggers: Vec<SpikeTrigger>,
    /// List of auxiliary input channels
    pub aux_input_channels: Vec<ChannelInfo>,
    /// List of supply voltage channels
    pub supply_voltage_channels: Vec<ChannelInfo>,
    /// List of board ADC channels
    pub board_adc_channels: Vec<ChannelInfo>,
    /// List of board digital input channels
    pub board_dig_in_channels: Vec<ChannelInfo>,
    /// List of board digital output channels
    pub board_dig_out_channels: Vec<ChannelInfo>,

    /// Byte offset where the first data block starts
    pub data_offset: u64,
    /// Size of one data block in bytes
    pub bytes_per_data_block: u64,
    /// Number of complete data blocks after the header
    pub num_data_blocks: u64,
}

impl RhdHeader {
    /// Whether any data blocks follow the header.
    pub fn data_present(&self) -> bool {
        self.num_data_blocks > 0
    }

    /// Number of amplifier-rate samples in the file.
    pub fn num_samples(&self) -> u64 {
        self.num_data_blocks * self.num_samples_per_data_block as u64
    }

    /// Returns the duration of the recording in seconds.
    ///
    /// If no data is present, returns 0.0.
    pub fn duration(&self) -> f64 {
        if self.sample_rate > 0.0 {
            self.num_samples() as f64 / self.sample_rate as f64
        } else {
            0.0
        }
    }
}

/// Analog signal streams that can be opened from an RHD file.
///
/// Names follow the stream names used by common Intan readers, e.g.
/// `"RHD2000 amplifier channel"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalStream {
    /// Neural data from amplifier channels (μV)
    Amplifier,
    /// Auxiliary inputs (V), sampled at a quarter of the amplifier rate
    AuxInput,
    /// Supply voltage (V), sampled once per data block
    SupplyVoltage,
    /// Board ADC inputs (V)
    BoardAdc,
}

impl SignalStream {
    pub const ALL: [SignalStream; 4] = [
        SignalStream::Amplifier,
        SignalStream::AuxInput,
        SignalStream::SupplyVoltage,
        SignalStream::BoardAdc,
    ];

    /// Stream name as accepted by [`SignalStream::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            SignalStream::Amplifier => "RHD2000 amplifier channel",
            SignalStream::AuxInput => "RHD2000 auxiliary input channel",
            SignalStream::SupplyVoltage => "RHD2000 supply voltage channel",
            SignalStream::BoardAdc => "USB board ADC input channel",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Samples this stream stores in one data block.
    pub fn samples_per_block(&self, header: &RhdHeader) -> usize {
        match self {
            SignalStream::Amplifier | SignalStream::BoardAdc => header.num_samples_per_data_block,
            SignalStream::AuxInput => header.num_samples_per_data_block / 4,
            SignalStream::SupplyVoltage => 1,
        }
    }

    /// Channels of this stream.
    pub fn channels<'a>(&self, header: &'a RhdHeader) -> &'a [ChannelInfo] {
        match self {
            SignalStream::Amplifier => &header.amplifier_channels,
            SignalStream::AuxInput => &header.aux_input_channels,
            SignalStream::SupplyVoltage => &header.supply_voltage_channels,
            SignalStream::BoardAdc => &header.board_adc_channels,
        }
    }
}

impl fmt::Display for SignalStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
