//! Synthetic RHD2000 files for integration tests.
#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const AMPLIFIER_STREAM: &str = "RHD2000 amplifier channel";
pub const AUX_STREAM: &str = "RHD2000 auxiliary input channel";
pub const SUPPLY_STREAM: &str = "RHD2000 supply voltage channel";

/// Layout of a generated file
#[derive(Debug, Clone)]
pub struct SyntheticRhd {
    pub version: (i16, i16),
    pub sample_rate: f32,
    pub amplifier_channels: usize,
    pub aux_channels: usize,
    pub supply_channels: usize,
    pub num_blocks: usize,
    pub first_timestamp: i32,
    /// Skip ahead in the timestamps before this sample
    pub timestamp_gap_at: Option<usize>,
    pub note: String,
}

impl Default for SyntheticRhd {
    fn default() -> Self {
        Self {
            version: (3, 0),
            sample_rate: 1280.0,
            amplifier_channels: 2,
            aux_channels: 1,
            supply_channels: 1,
            num_blocks: 10,
            first_timestamp: 0,
            timestamp_gap_at: None,
            note: "synthetic".to_string(),
        }
    }
}

/// Raw amplifier word written for channel `ch` at file sample `sample`
pub fn amplifier_raw(ch: usize, sample: usize) -> u16 {
    (32768 + ch * 1000 + sample % 1000) as u16
}

/// Amplifier value in μV as the reader should report it
pub fn amplifier_uv(ch: usize, sample: usize) -> f64 {
    (amplifier_raw(ch, sample) as f64 - 32768.0) * 0.195
}

pub fn aux_raw(ch: usize, sample: usize) -> u16 {
    (1000 + ch * 100 + sample % 100) as u16
}

pub fn supply_raw(ch: usize, block: usize) -> u16 {
    (44000 + ch * 10 + block % 10) as u16
}

fn write_qstring<W: Write>(w: &mut W, text: &str) {
    if text.is_empty() {
        w.write_u32::<LittleEndian>(0xFFFFFFFF).unwrap();
        return;
    }
    let units: Vec<u16> = text.encode_utf16().collect();
    w.write_u32::<LittleEndian>((units.len() * 2) as u32).unwrap();
    for unit in units {
        w.write_u16::<LittleEndian>(unit).unwrap();
    }
}

fn write_channel<W: Write>(w: &mut W, name: &str, order: i16, signal_type: i16) {
    write_qstring(w, name);
    write_qstring(w, name);
    w.write_i16::<LittleEndian>(order).unwrap(); // native order
    w.write_i16::<LittleEndian>(order).unwrap(); // custom order
    w.write_i16::<LittleEndian>(signal_type).unwrap();
    w.write_i16::<LittleEndian>(1).unwrap(); // enabled
    w.write_i16::<LittleEndian>(order).unwrap(); // chip channel
    w.write_i16::<LittleEndian>(0).unwrap(); // board stream
    for _ in 0..4 {
        w.write_i16::<LittleEndian>(0).unwrap(); // spike trigger settings
    }
    w.write_f32::<LittleEndian>(1.0e5).unwrap();
    w.write_f32::<LittleEndian>(-0.5).unwrap();
}

impl SyntheticRhd {
    fn at_least(&self, major: i16, minor: i16) -> bool {
        self.version >= (major, minor)
    }

    pub fn samples_per_block(&self) -> usize {
        if self.version.0 >= 3 {
            128
        } else {
            60
        }
    }

    pub fn num_samples(&self) -> usize {
        self.num_blocks * self.samples_per_block()
    }

    pub fn write(&self, path: &Path) {
        let mut w = BufWriter::new(File::create(path).unwrap());
        self.write_header(&mut w);
        self.write_blocks(&mut w);
        w.flush().unwrap();
    }

    fn write_header<W: Write>(&self, w: &mut W) {
        w.write_u32::<LittleEndian>(0xc6912702).unwrap();
        w.write_i16::<LittleEndian>(self.version.0).unwrap();
        w.write_i16::<LittleEndian>(self.version.1).unwrap();
        w.write_f32::<LittleEndian>(self.sample_rate).unwrap();

        w.write_i16::<LittleEndian>(1).unwrap(); // dsp enabled
        for value in [1.0f32, 0.1, 7500.0, 1.0, 0.1, 7500.0] {
            w.write_f32::<LittleEndian>(value).unwrap();
        }
        w.write_i16::<LittleEndian>(2).unwrap(); // notch at 60 Hz
        w.write_f32::<LittleEndian>(1000.0).unwrap();
        w.write_f32::<LittleEndian>(1000.0).unwrap();

        write_qstring(w, &self.note);
        write_qstring(w, "");
        write_qstring(w, "");

        if self.at_least(1, 1) {
            w.write_i16::<LittleEndian>(0).unwrap(); // temperature sensors
        }
        if self.at_least(1, 3) {
            w.write_i16::<LittleEndian>(0).unwrap(); // eval board mode
        }
        if self.version.0 > 1 {
            write_qstring(w, "Hardware");
        }

        w.write_i16::<LittleEndian>(1).unwrap(); // signal groups
        write_qstring(w, "Port A");
        write_qstring(w, "A");
        w.write_i16::<LittleEndian>(1).unwrap();
        let total = self.amplifier_channels + self.aux_channels + self.supply_channels;
        w.write_i16::<LittleEndian>(total as i16).unwrap();
        w.write_i16::<LittleEndian>(self.amplifier_channels as i16).unwrap();

        for ch in 0..self.amplifier_channels {
            write_channel(w, &format!("A-{:03}", ch), ch as i16, 0);
        }
        for ch in 0..self.aux_channels {
            write_channel(w, &format!("A-AUX{}", ch + 1), ch as i16, 1);
        }
        for ch in 0..self.supply_channels {
            write_channel(w, &format!("A-VDD{}", ch + 1), ch as i16, 2);
        }
    }

    fn write_blocks<W: Write>(&self, w: &mut W) {
        let n = self.samples_per_block();
        for block in 0..self.num_blocks {
            for i in 0..n {
                let sample = block * n + i;
                let skip = match self.timestamp_gap_at {
                    Some(at) if sample >= at => 5,
                    _ => 0,
                };
                w.write_i32::<LittleEndian>(self.first_timestamp + (sample + skip) as i32)
                    .unwrap();
            }
            for ch in 0..self.amplifier_channels {
                for i in 0..n {
                    w.write_u16::<LittleEndian>(amplifier_raw(ch, block * n + i))
                        .unwrap();
                }
            }
            for ch in 0..self.aux_channels {
                for i in 0..n / 4 {
                    w.write_u16::<LittleEndian>(aux_raw(ch, block * (n / 4) + i))
                        .unwrap();
                }
            }
            for ch in 0..self.supply_channels {
                w.write_u16::<LittleEndian>(supply_raw(ch, block)).unwrap();
            }
        }
    }
}
