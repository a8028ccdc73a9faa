use byteorder::{LittleEndian, ReadBytesExt};
use ndarray::Array2;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::error::{Result, SelectorError};
use crate::stream::{check_frame_range, SampleStream, SegmentLoader};
use crate::types::*;

// Constants used throughout the reader
const RHD_MAGIC_NUMBER: u32 = 0xc6912702;
const LEGACY_SAMPLES_PER_DATA_BLOCK: usize = 60;
const SAMPLES_PER_DATA_BLOCK: usize = 128;
const READ_BUFFER_CAPACITY: usize = 65536;

// Scaling constants (from Intan RHD data format specification)
const AMPLIFIER_SCALE_FACTOR: f64 = 0.195; // μV per bit
const AUX_INPUT_SCALE_FACTOR: f64 = 0.0000374; // V per bit
const SUPPLY_VOLTAGE_SCALE_FACTOR: f64 = 0.0000748; // V per bit
const ADC_SCALE_DEFAULT: f64 = 0.000050354; // V per bit
const ADC_SCALE_BOARD_MODE_1: f64 = 0.000152590218966964; // V per bit, ±5 V range
const ADC_SCALE_BOARD_MODE_13: f64 = 0.0003125; // V per bit, ±10.24 V range
const ADC_OFFSET: f64 = 32768.0;

/// Reads the header of an RHD file without touching its data blocks.
///
/// The returned header includes the data-section geometry, so
/// [`RhdHeader::duration`] is available without reading any samples.
///
/// # Examples
///
/// ```no_run
/// use intan_selector::read_header;
///
/// let header = read_header("data/day2_230623_102551.rhd").unwrap();
/// println!("{} channels, {:.2} s", header.amplifier_channels.len(), header.duration());
/// ```
pub fn read_header<P: AsRef<Path>>(file_path: P) -> Result<RhdHeader> {
    let path = file_path.as_ref();
    let file = File::open(path)?;
    let file_size = file.metadata()?.len();
    let mut reader = BufReader::with_capacity(READ_BUFFER_CAPACITY, file);
    parse_header(&mut reader, path, file_size)
}

/// Parses the header and locates the data blocks that follow it
fn parse_header<R: Read + Seek>(reader: &mut R, path: &Path, file_size: u64) -> Result<RhdHeader> {
    let mut header = RhdHeader::default();

    check_magic_number(reader, path)?;
    read_version_number(reader, &mut header)?;

    header.sample_rate = reader.read_f32::<LittleEndian>()?;

    read_freq_settings(reader, &mut header)?;
    read_notch_filter_frequency(reader, &mut header)?;
    read_impedance_test_frequencies(reader, &mut header)?;
    read_notes(reader, &mut header)?;

    // Temperature sensor channels were added in version 1.1
    if header.version.at_least(1, 1) {
        header.num_temp_sensor_channels = reader.read_i16::<LittleEndian>()?.max(0) as usize;
    }

    // Eval board mode was added in version 1.3
    if header.version.at_least(1, 3) {
        header.eval_board_mode = reader.read_i16::<LittleEndian>()? as i32;
    }

    header.num_samples_per_data_block = if header.version.major >= 3 {
        SAMPLES_PER_DATA_BLOCK
    } else {
        LEGACY_SAMPLES_PER_DATA_BLOCK
    };

    // Reference channel name was added in version 2.0
    if header.version.major > 1 {
        header.reference_channel = read_qstring(reader)?;
    }

    set_stream_sample_rates(&mut header);
    read_signal_summary(reader, &mut header)?;
    locate_data_blocks(reader, path, file_size, &mut header)?;

    log_header_summary(&header, path);

    Ok(header)
}

/// Helper function to check the magic number that identifies RHD files
fn check_magic_number<R: Read>(reader: &mut R, path: &Path) -> Result<()> {
    let magic = reader.read_u32::<LittleEndian>()?;
    if magic != RHD_MAGIC_NUMBER {
        return Err(SelectorError::UnrecognizedFileFormat {
            path: path.to_path_buf(),
            magic,
        });
    }
    Ok(())
}

/// Helper function to read the version number
fn read_version_number<R: Read>(reader: &mut R, header: &mut RhdHeader) -> Result<()> {
    header.version.major = reader.read_i16::<LittleEndian>()? as i32;
    header.version.minor = reader.read_i16::<LittleEndian>()? as i32;
    Ok(())
}

/// Helper function to read frequency settings
fn read_freq_settings<R: Read>(reader: &mut R, header: &mut RhdHeader) -> Result<()> {
    let freq = &mut header.frequency_parameters;

    freq.dsp_enabled = reader.read_i16::<LittleEndian>()? as i32;
    freq.actual_dsp_cutoff_frequency = reader.read_f32::<LittleEndian>()?;
    freq.actual_lower_bandwidth = reader.read_f32::<LittleEndian>()?;
    freq.actual_upper_bandwidth = reader.read_f32::<LittleEndian>()?;
    freq.desired_dsp_cutoff_frequency = reader.read_f32::<LittleEndian>()?;
    freq.desired_lower_bandwidth = reader.read_f32::<LittleEndian>()?;
    freq.desired_upper_bandwidth = reader.read_f32::<LittleEndian>()?;

    Ok(())
}

/// Helper function to read notch filter frequency
fn read_notch_filter_frequency<R: Read>(reader: &mut R, header: &mut RhdHeader) -> Result<()> {
    let notch_filter_mode = reader.read_i16::<LittleEndian>()?;

    header.frequency_parameters.notch_filter_frequency = match notch_filter_mode {
        1 => Some(50),
        2 => Some(60),
        _ => None,
    };

    Ok(())
}

/// Helper function to read impedance test frequencies
fn read_impedance_test_frequencies<R: Read>(reader: &mut R, header: &mut RhdHeader) -> Result<()> {
    header.frequency_parameters.desired_impedance_test_frequency =
        reader.read_f32::<LittleEndian>()?;
    header.frequency_parameters.actual_impedance_test_frequency =
        reader.read_f32::<LittleEndian>()?;
    Ok(())
}

/// Helper function to read notes
fn read_notes<R: Read + Seek>(reader: &mut R, header: &mut RhdHeader) -> Result<()> {
    header.notes.note1 = read_qstring(reader)?;
    header.notes.note2 = read_qstring(reader)?;
    header.notes.note3 = read_qstring(reader)?;
    Ok(())
}

// Per-stream rates derive from the amplifier rate and the block geometry
fn set_stream_sample_rates(header: &mut RhdHeader) {
    let rate = header.sample_rate;
    let freq = &mut header.frequency_parameters;

    freq.amplifier_sample_rate = rate;
    freq.aux_input_sample_rate = rate / 4.0;
    freq.supply_voltage_sample_rate = rate / header.num_samples_per_data_block as f32;
    freq.board_adc_sample_rate = rate;
    freq.board_dig_in_sample_rate = rate;
}

/// Helper function to read signal summary
fn read_signal_summary<R: Read + Seek>(reader: &mut R, header: &mut RhdHeader) -> Result<()> {
    let number_of_signal_groups = reader.read_i16::<LittleEndian>()?;

    for _ in 0..number_of_signal_groups {
        add_signal_group_information(header, reader)?;
    }

    Ok(())
}

/// Helper function to add signal group information
fn add_signal_group_information<R: Read + Seek>(header: &mut RhdHeader, reader: &mut R) -> Result<()> {
    let signal_group_name = read_qstring(reader)?;
    let signal_group_prefix = read_qstring(reader)?;

    let signal_group_enabled = reader.read_i16::<LittleEndian>()?;
    let signal_group_num_channels = reader.read_i16::<LittleEndian>()?;
    let _ = reader.read_i16::<LittleEndian>()?; // number of amplifier channels (unused)

    if signal_group_num_channels > 0 && signal_group_enabled > 0 {
        for _ in 0..signal_group_num_channels {
            add_channel_information(header, reader, &signal_group_name, &signal_group_prefix)?;
        }
    }

    Ok(())
}

/// Helper function to add channel information
fn add_channel_information<R: Read + Seek>(
    header: &mut RhdHeader,
    reader: &mut R,
    signal_group_name: &str,
    signal_group_prefix: &str,
) -> Result<()> {
    let mut new_channel = ChannelInfo {
        port_name: signal_group_name.to_string(),
        port_prefix: signal_group_prefix.to_string(),
        ..ChannelInfo::default()
    };

    new_channel.native_channel_name = read_qstring(reader)?;
    new_channel.custom_channel_name = read_qstring(reader)?;

    new_channel.native_order = reader.read_i16::<LittleEndian>()? as i32;
    new_channel.custom_order = reader.read_i16::<LittleEndian>()? as i32;

    let signal_type = reader.read_i16::<LittleEndian>()? as i32;
    let channel_enabled = reader.read_i16::<LittleEndian>()? != 0;

    new_channel.chip_channel = reader.read_i16::<LittleEndian>()? as i32;
    new_channel.board_stream = reader.read_i16::<LittleEndian>()? as i32;

    let new_trigger = SpikeTrigger {
        voltage_trigger_mode: reader.read_i16::<LittleEndian>()? as i32,
        voltage_threshold: reader.read_i16::<LittleEndian>()? as i32,
        digital_trigger_channel: reader.read_i16::<LittleEndian>()? as i32,
        digital_edge_polarity: reader.read_i16::<LittleEndian>()? as i32,
    };

    new_channel.electrode_impedance_magnitude = reader.read_f32::<LittleEndian>()?;
    new_channel.electrode_impedance_phase = reader.read_f32::<LittleEndian>()?;

    if !channel_enabled {
        return Ok(());
    }

    match signal_type {
        0 => {
            header.amplifier_channels.push(new_channel);
            header.spike_triggers.push(new_trigger);
        }
        1 => header.aux_input_channels.push(new_channel),
        2 => header.supply_voltage_channels.push(new_channel),
        3 => header.board_adc_channels.push(new_channel),
        4 => header.board_dig_in_channels.push(new_channel),
        5 => header.board_dig_out_channels.push(new_channel),
        other => return Err(SelectorError::InvalidChannelType(other)),
    }

    Ok(())
}

/// Helper function to read a QString (UTF-16 encoded string)
///
/// QStrings in RHD files are stored as UTF-16 with a 4-byte length prefix.
/// A special value of 0xFFFFFFFF indicates an empty string.
fn read_qstring<R: Read + Seek>(reader: &mut R) -> Result<String> {
    let length = reader.read_u32::<LittleEndian>()?;

    if length == 0xFFFFFFFF {
        return Ok(String::new());
    }

    // Verify that the string length is reasonable given remaining file size
    let current_position = reader.stream_position()?;
    let file_length = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(current_position))?;

    if length as u64 > file_length - current_position + 1 {
        return Err(SelectorError::StringReadError);
    }

    // Convert length from bytes to 16-bit Unicode words
    let length = (length as usize) / 2;

    let mut data = Vec::with_capacity(length);
    for _ in 0..length {
        data.push(reader.read_u16::<LittleEndian>()?);
    }

    String::from_utf16(&data).map_err(|_| SelectorError::StringReadError)
}

/// Computes block geometry from the file size and records it in the header
fn locate_data_blocks<R: Read + Seek>(
    reader: &mut R,
    path: &Path,
    file_size: u64,
    header: &mut RhdHeader,
) -> Result<()> {
    let bytes_per_block = get_bytes_per_data_block(header) as u64;

    let data_offset = reader.stream_position()?;
    let bytes_remaining = file_size.saturating_sub(data_offset);

    // If the file size is somehow different than expected, raise an error
    if bytes_remaining % bytes_per_block != 0 {
        return Err(SelectorError::FileSizeError {
            path: path.to_path_buf(),
            bytes_remaining,
            bytes_per_block,
        });
    }

    header.data_offset = data_offset;
    header.bytes_per_data_block = bytes_per_block;
    header.num_data_blocks = bytes_remaining / bytes_per_block;

    Ok(())
}

// Helper function to get bytes per data block
fn get_bytes_per_data_block(header: &RhdHeader) -> usize {
    let num_samples_per_data_block = header.num_samples_per_data_block;

    // Timestamps (one channel always present): 4 bytes per sample
    let mut bytes_per_block = bytes_per_signal_type(num_samples_per_data_block, 1, 4);

    // Amplifier, auxiliary input, supply voltage and board ADC sections
    for stream in SignalStream::ALL {
        bytes_per_block += stream_section_size(header, stream);
    }

    // Temperature sensors: one sample per block per sensor
    bytes_per_block += bytes_per_signal_type(1, header.num_temp_sensor_channels, 2);

    // Digital inputs and outputs share one 16-bit word per sample
    if !header.board_dig_in_channels.is_empty() {
        bytes_per_block += bytes_per_signal_type(num_samples_per_data_block, 1, 2);
    }
    if !header.board_dig_out_channels.is_empty() {
        bytes_per_block += bytes_per_signal_type(num_samples_per_data_block, 1, 2);
    }

    bytes_per_block
}

// Helper function to calculate bytes per signal type
fn bytes_per_signal_type(num_samples: usize, num_channels: usize, bytes_per_sample: usize) -> usize {
    num_samples * num_channels * bytes_per_sample
}

fn stream_section_size(header: &RhdHeader, stream: SignalStream) -> usize {
    bytes_per_signal_type(
        stream.samples_per_block(header),
        stream.channels(header).len(),
        2,
    )
}

/// Byte offset of a stream's section from the start of a data block.
///
/// Block layout: timestamps, amplifier, auxiliary input, supply voltage,
/// temperature sensors, board ADC, digital in, digital out.
fn stream_section_offset(header: &RhdHeader, stream: SignalStream) -> usize {
    let mut offset = bytes_per_signal_type(header.num_samples_per_data_block, 1, 4);

    for preceding in SignalStream::ALL {
        if preceding == stream {
            break;
        }
        offset += stream_section_size(header, preceding);
        if preceding == SignalStream::SupplyVoltage {
            offset += bytes_per_signal_type(1, header.num_temp_sensor_channels, 2);
        }
    }

    offset
}

/// Converts a raw 16-bit sample of `stream` to physical units
fn scale_sample(stream: SignalStream, raw: u16, eval_board_mode: i32) -> f64 {
    let raw = raw as f64;
    match stream {
        SignalStream::Amplifier => (raw - ADC_OFFSET) * AMPLIFIER_SCALE_FACTOR,
        SignalStream::AuxInput => raw * AUX_INPUT_SCALE_FACTOR,
        SignalStream::SupplyVoltage => raw * SUPPLY_VOLTAGE_SCALE_FACTOR,
        SignalStream::BoardAdc => match eval_board_mode {
            1 => (raw - ADC_OFFSET) * ADC_SCALE_BOARD_MODE_1,
            13 => (raw - ADC_OFFSET) * ADC_SCALE_BOARD_MODE_13,
            _ => raw * ADC_SCALE_DEFAULT,
        },
    }
}

fn plural(n: usize) -> &'static str {
    if n != 1 {
        "s"
    } else {
        ""
    }
}

// Helper function to log header summary
fn log_header_summary(header: &RhdHeader, path: &Path) {
    log::debug!(
        "Reading Intan Technologies RHD2000 Data File {}, Version {}",
        path.display(),
        header.version
    );

    let counts = [
        ("amplifier", header.amplifier_channels.len()),
        ("auxiliary input", header.aux_input_channels.len()),
        ("supply voltage", header.supply_voltage_channels.len()),
        ("board ADC", header.board_adc_channels.len()),
        ("board digital input", header.board_dig_in_channels.len()),
        ("board digital output", header.board_dig_out_channels.len()),
        ("temperature sensor", header.num_temp_sensor_channels),
    ];
    for (kind, n) in counts {
        log::debug!("Found {} {} channel{}.", n, kind, plural(n));
    }

    if header.data_present() {
        log::info!(
            "{} contains {:.3} seconds of data. Amplifiers were sampled at {:.2} kS/s.",
            path.display(),
            header.duration(),
            header.sample_rate / 1000.0
        );
    } else {
        log::info!(
            "{} contains no data. Amplifiers were sampled at {:.2} kS/s.",
            path.display(),
            header.sample_rate / 1000.0
        );
    }
}

/// One analog signal stream of an RHD file, read lazily block by block.
///
/// Only the header is parsed on open. The file handle lives as long as the
/// stream and is closed when it is dropped.
#[derive(Debug)]
pub struct RhdStream {
    path: PathBuf,
    reader: BufReader<File>,
    header: RhdHeader,
    stream: SignalStream,
    channel_ids: Vec<String>,
    samples_per_block: usize,
    section_offset: u64,
    sample_rate: f64,
}

impl RhdStream {
    /// Opens `stream_name` (e.g. `"RHD2000 amplifier channel"`) from an RHD file.
    ///
    /// Unknown stream names, and streams with no enabled channels in this
    /// file, fail with `StreamNotFound`.
    pub fn open<P: AsRef<Path>>(file_path: P, stream_name: &str) -> Result<Self> {
        let path = file_path.as_ref();
        let stream_not_found = || SelectorError::StreamNotFound {
            path: path.to_path_buf(),
            stream: stream_name.to_string(),
        };

        let stream = SignalStream::from_name(stream_name).ok_or_else(stream_not_found)?;

        let file = File::open(path)?;
        let file_size = file.metadata()?.len();
        let mut reader = BufReader::with_capacity(READ_BUFFER_CAPACITY, file);
        let header = parse_header(&mut reader, path, file_size)?;

        let channels = stream.channels(&header);
        if channels.is_empty() {
            return Err(stream_not_found());
        }

        let channel_ids = channels
            .iter()
            .map(|c| c.native_channel_name.clone())
            .collect();
        let samples_per_block = stream.samples_per_block(&header);
        let section_offset = stream_section_offset(&header, stream) as u64;
        let sample_rate = header.sample_rate as f64 * samples_per_block as f64
            / header.num_samples_per_data_block as f64;

        Ok(Self {
            path: path.to_path_buf(),
            reader,
            header,
            stream,
            channel_ids,
            samples_per_block,
            section_offset,
            sample_rate,
        })
    }

    pub fn header(&self) -> &RhdHeader {
        &self.header
    }

    pub fn signal_stream(&self) -> SignalStream {
        self.stream
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Counts discontinuities in the per-sample timestamps of the whole file.
    ///
    /// A non-zero count means the time scale is not uniform.
    pub fn timestamp_gaps(&mut self) -> Result<usize> {
        let num_samples = self.header.num_samples_per_data_block;
        let mut buffer = vec![0u8; num_samples * 4];
        let mut previous: Option<i32> = None;
        let mut num_gaps = 0;

        for block in 0..self.header.num_data_blocks {
            let position = self.header.data_offset + block * self.header.bytes_per_data_block;
            self.reader.seek(SeekFrom::Start(position))?;
            self.reader.read_exact(&mut buffer)?;

            for chunk in buffer.chunks_exact(4) {
                let ts = i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                if let Some(prev) = previous {
                    if ts.wrapping_sub(prev) != 1 {
                        num_gaps += 1;
                    }
                }
                previous = Some(ts);
            }
        }

        if num_gaps == 0 {
            log::debug!("No missing timestamps in {}.", self.path.display());
        } else {
            log::warn!(
                "{} gap{} in timestamp data found in {}. Time scale will not be uniform!",
                num_gaps,
                plural(num_gaps),
                self.path.display()
            );
        }

        Ok(num_gaps)
    }
}

impl SampleStream for RhdStream {
    fn channel_ids(&self) -> &[String] {
        &self.channel_ids
    }

    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn num_samples(&self) -> u64 {
        self.header.num_data_blocks * self.samples_per_block as u64
    }

    fn read(&mut self, start: u64, end: u64) -> Result<Array2<f64>> {
        check_frame_range(start, end, self.num_samples())?;

        let num_channels = self.channel_ids.len();
        let mut out = Array2::zeros((num_channels, (end - start) as usize));
        if start == end {
            return Ok(out);
        }

        let per_block = self.samples_per_block as u64;
        let mut buffer = vec![0u8; self.samples_per_block * num_channels * 2];

        for block in start / per_block..=(end - 1) / per_block {
            let position = self.header.data_offset
                + block * self.header.bytes_per_data_block
                + self.section_offset;
            self.reader.seek(SeekFrom::Start(position))?;
            self.reader.read_exact(&mut buffer)?;

            let block_start = block * per_block;
            let from = start.max(block_start) - block_start;
            let to = end.min(block_start + per_block) - block_start;

            // Channel-major within the section: all samples of channel 0, then channel 1, ...
            for ch in 0..num_channels {
                for s in from..to {
                    let idx = 2 * (ch * self.samples_per_block + s as usize);
                    let raw = u16::from_le_bytes([buffer[idx], buffer[idx + 1]]);
                    out[[ch, (block_start + s - start) as usize]] =
                        scale_sample(self.stream, raw, self.header.eval_board_mode);
                }
            }
        }

        Ok(out)
    }
}

/// [`SegmentLoader`] for Intan RHD2000 files.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntanLoader;

impl SegmentLoader for IntanLoader {
    type Stream = RhdStream;

    fn open(&self, path: &Path, stream_name: &str) -> Result<Self::Stream> {
        RhdStream::open(path, stream_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use std::io::Cursor;

    fn qstring_bytes(text: &str) -> Vec<u8> {
        let mut bytes = Vec::new();
        let units: Vec<u16> = text.encode_utf16().collect();
        bytes
            .write_u32::<LittleEndian>((units.len() * 2) as u32)
            .unwrap();
        for unit in units {
            bytes.write_u16::<LittleEndian>(unit).unwrap();
        }
        bytes
    }

    #[test]
    fn reads_qstring() {
        let mut cursor = Cursor::new(qstring_bytes("A-012 µ"));
        assert_eq!(read_qstring(&mut cursor).unwrap(), "A-012 µ");
    }

    #[test]
    fn empty_qstring_marker() {
        let mut cursor = Cursor::new(vec![0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(read_qstring(&mut cursor).unwrap(), "");
    }

    #[test]
    fn truncated_qstring_is_rejected() {
        let mut bytes = Vec::new();
        bytes.write_u32::<LittleEndian>(400).unwrap();
        bytes.write_u16::<LittleEndian>(65).unwrap();
        let err = read_qstring(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, SelectorError::StringReadError));
    }

    #[test]
    fn bad_magic_is_unrecognized() {
        let mut bytes = Vec::new();
        bytes.write_u32::<LittleEndian>(0xd69127ac).unwrap();
        let err = parse_header(&mut Cursor::new(bytes), Path::new("x.rhs"), 4).unwrap_err();
        assert!(matches!(
            err,
            SelectorError::UnrecognizedFileFormat { magic: 0xd69127ac, .. }
        ));
    }

    #[test]
    fn scales_raw_samples() {
        assert_eq!(scale_sample(SignalStream::Amplifier, 32768, 0), 0.0);
        assert!((scale_sample(SignalStream::Amplifier, 32778, 0) - 1.95).abs() < 1e-9);
        assert!((scale_sample(SignalStream::AuxInput, 1000, 0) - 0.0374).abs() < 1e-12);
        assert!((scale_sample(SignalStream::BoardAdc, 32768 + 3200, 13) - 1.0).abs() < 1e-9);
        assert!((scale_sample(SignalStream::BoardAdc, 1000, 0) - 0.050354).abs() < 1e-12);
    }

    fn channels(n: usize) -> Vec<ChannelInfo> {
        (0..n)
            .map(|i| ChannelInfo {
                native_channel_name: format!("A-{:03}", i),
                ..ChannelInfo::default()
            })
            .collect()
    }

    #[test]
    fn block_geometry_follows_stream_layout() {
        let header = RhdHeader {
            num_samples_per_data_block: 128,
            num_temp_sensor_channels: 1,
            amplifier_channels: channels(4),
            aux_input_channels: channels(3),
            supply_voltage_channels: channels(1),
            board_adc_channels: channels(2),
            board_dig_in_channels: channels(1),
            ..RhdHeader::default()
        };

        // 512 + 1024 + 192 + 2 + 2 (temp) + 512 + 256 (dig in)
        assert_eq!(get_bytes_per_data_block(&header), 2500);
        assert_eq!(stream_section_offset(&header, SignalStream::Amplifier), 512);
        assert_eq!(stream_section_offset(&header, SignalStream::AuxInput), 1536);
        assert_eq!(stream_section_offset(&header, SignalStream::SupplyVoltage), 1728);
        assert_eq!(stream_section_offset(&header, SignalStream::BoardAdc), 1732);
    }
}
