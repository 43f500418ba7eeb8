//! An ordered collection of frequency-response samples, with whitespace-text
//! I/O and pointwise transforms.

use std::fs;
use std::path::Path;

use crate::error::IdentError;
use crate::freq_response::FreqResponse;
use crate::io::atomic_write;
use crate::transfer_function::TransferFunction;

/// An ordered sequence of [`FreqResponse`] samples. Order follows insertion
/// (tail-insertion, so a write-then-read cycle preserves order).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FreqResponseList {
    samples: Vec<FreqResponse>,
}

impl FreqResponseList {
    pub fn new() -> Self {
        FreqResponseList {
            samples: Vec::new(),
        }
    }

    pub fn from_samples(samples: Vec<FreqResponse>) -> Self {
        FreqResponseList { samples }
    }

    pub fn push(&mut self, fr: FreqResponse) {
        self.samples.push(fr);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FreqResponse> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[FreqResponse] {
        &self.samples
    }

    /// Drops every sample with `f` outside `[fmin, fmax]`, in place.
    pub fn filter_range(&mut self, fmin: f64, fmax: f64) {
        self.samples.retain(|fr| fr.f >= fmin && fr.f <= fmax);
    }

    /// Parses whitespace-separated `f g p` triples from `text`, one sample
    /// per line, keeping only samples with `f` inside `[fmin, fmax]`.
    /// Parsing stops at the first line that does not contain three
    /// numbers; this is not an error, matching the source's scan-until-EOF
    /// behavior.
    pub fn parse(text: &str, fmin: f64, fmax: f64) -> FreqResponseList {
        let mut samples = Vec::new();
        let mut dropped = 0usize;
        let mut stopped_at = None;
        for (i, line) in text.lines().enumerate() {
            let nums: Vec<f64> = line
                .split_whitespace()
                .filter_map(|tok| tok.parse::<f64>().ok())
                .collect();
            if nums.len() < 3 {
                stopped_at = Some(i);
                break;
            }
            let fr = FreqResponse::new(nums[0], nums[1], nums[2]);
            if fr.f < fmin || fr.f > fmax {
                dropped += 1;
                continue;
            }
            samples.push(fr);
        }
        log::debug!(
            "parsed {} sample(s), dropped {} out of [{}, {}]{}",
            samples.len(),
            dropped,
            fmin,
            fmax,
            stopped_at
                .map(|i| format!(", stopped at line {i}"))
                .unwrap_or_default()
        );
        FreqResponseList::from_samples(samples)
    }

    /// Reads samples from a text file. Fails with `FileOpen` if the file
    /// cannot be read; otherwise behaves as [`FreqResponseList::parse`].
    pub fn read_file(path: impl AsRef<Path>, fmin: f64, fmax: f64) -> Result<Self, IdentError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| IdentError::FileOpen {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::parse(&text, fmin, fmax))
    }

    /// Renders the list as whitespace-separated `f g p` lines, one sample
    /// per line, each value at roughly 10 significant digits, restricted to
    /// `[fmin, fmax]`.
    pub fn render(&self, fmin: f64, fmax: f64) -> String {
        let mut out = String::new();
        for fr in self.samples.iter().filter(|fr| fr.f >= fmin && fr.f <= fmax) {
            out.push_str(&format!("{:.10e} {:.10e} {:.10e}\n", fr.f, fr.g, fr.p));
        }
        out
    }

    /// Atomically writes the list to a text file via [`render`].
    pub fn write_file(&self, path: impl AsRef<Path>, fmin: f64, fmax: f64) -> Result<(), IdentError> {
        let path = path.as_ref();
        atomic_write(path, self.render(fmin, fmax)).map_err(|source| IdentError::FileOpen {
            path: path.display().to_string(),
            source,
        })
    }

    /// Cascades every sample through `tf`, preserving order.
    pub fn connect_with_tf(&self, tf: &TransferFunction) -> Result<FreqResponseList, IdentError> {
        let mut out = Vec::with_capacity(self.samples.len());
        for fr in &self.samples {
            out.push(fr.connect_with_tf(tf)?);
        }
        Ok(FreqResponseList::from_samples(out))
    }

    /// Open-to-closed-loop transform of every sample, preserving order.
    pub fn to_closed(&self) -> Result<FreqResponseList, IdentError> {
        let mut out = Vec::with_capacity(self.samples.len());
        for fr in &self.samples {
            out.push(fr.open_to_closed()?);
        }
        Ok(FreqResponseList::from_samples(out))
    }

    /// Closed-to-open-loop transform of every sample, preserving order.
    pub fn to_open(&self) -> Result<FreqResponseList, IdentError> {
        let mut out = Vec::with_capacity(self.samples.len());
        for fr in &self.samples {
            out.push(fr.closed_to_open()?);
        }
        Ok(FreqResponseList::from_samples(out))
    }
}

impl<'a> IntoIterator for &'a FreqResponseList {
    type Item = &'a FreqResponse;
    type IntoIter = std::slice::Iter<'a, FreqResponse>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_stops_at_malformed_line() {
        let text = "1 2 3\n4 5 6\nnot enough\n7 8 9\n";
        let list = FreqResponseList::parse(text, 0.0, f64::INFINITY);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn parse_drops_out_of_window_samples() {
        let text = "1 0 0\n50 0 0\n100 0 0\n";
        let list = FreqResponseList::parse(text, 10.0, 60.0);
        assert_eq!(list.len(), 1);
        assert_eq!(list.as_slice()[0].f, 50.0);
    }

    #[test]
    fn render_then_parse_round_trips_in_order() {
        let list = FreqResponseList::from_samples(vec![
            FreqResponse::new(1.0, 2.0, 3.0),
            FreqResponse::new(2.0, 4.0, 6.0),
            FreqResponse::new(3.0, 6.0, 9.0),
        ]);
        let text = list.render(0.0, f64::INFINITY);
        let back = FreqResponseList::parse(&text, 0.0, f64::INFINITY);
        assert_eq!(back.len(), 3);
        for (a, b) in list.iter().zip(back.iter()) {
            assert!((a.f - b.f).abs() < 1e-8);
            assert!((a.g - b.g).abs() < 1e-8);
            assert!((a.p - b.p).abs() < 1e-8);
        }
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.txt");
        let list = FreqResponseList::from_samples(vec![
            FreqResponse::new(1.0, 0.0, 0.0),
            FreqResponse::new(2.0, 0.0, 0.0),
            FreqResponse::new(3.0, 0.0, 0.0),
        ]);
        list.write_file(&path, 0.0, f64::INFINITY).unwrap();
        let back = FreqResponseList::read_file(&path, 0.0, f64::INFINITY).unwrap();
        let fs: Vec<f64> = back.iter().map(|fr| fr.f).collect();
        assert_eq!(fs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn filter_range_is_in_place() {
        let mut list = FreqResponseList::from_samples(vec![
            FreqResponse::new(1.0, 0.0, 0.0),
            FreqResponse::new(50.0, 0.0, 0.0),
            FreqResponse::new(100.0, 0.0, 0.0),
        ]);
        list.filter_range(10.0, 60.0);
        assert_eq!(list.len(), 1);
    }
}
