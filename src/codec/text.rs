//! Line-oriented text format for network parameters.
//!
//! ```text
//! sigmoid-nn 1                      format header and version
//! 3                                 layer count
//! [2,2,1]                           layer sizes
//! [[[w000,w001],[w010,w011]],[...]] weights[l][i][j]
//! [null,[b10,b11],[b20]]            biases[l][i], null for the input layer
//! ```
//!
//! Each record is a JSON literal parsed by `serde_json`; nothing in the file
//! is evaluated. Floats use shortest round-trip formatting, so a decoded
//! network is bit-identical to the encoded one.
//!
//! Files without the header line are read as the legacy layout: the same
//! four records, with the bias placeholder spelled `None`.

use std::io::{BufRead, Write};

use log::debug;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::network::network::Network;

pub const FORMAT_MAGIC: &str = "sigmoid-nn";
pub const FORMAT_VERSION: u32 = 1;

/// Encodes `network` as a string in the current format version.
pub fn encode(network: &Network) -> Result<String> {
    let sizes = network.layer_sizes();
    let weights: Vec<&Vec<Vec<f64>>> = network.layers().iter().map(|l| &l.weights.data).collect();
    let biases: Vec<Option<&Vec<f64>>> = std::iter::once(None)
        .chain(network.layers().iter().map(|l| Some(&l.biases)))
        .collect();

    let mut out = format!("{FORMAT_MAGIC} {FORMAT_VERSION}\n{}\n", sizes.len());
    for record in [to_json(&sizes)?, to_json(&weights)?, to_json(&biases)?] {
        out.push_str(&record);
        out.push('\n');
    }
    Ok(out)
}

pub fn write_to<W: Write>(network: &Network, writer: &mut W) -> Result<()> {
    writer.write_all(encode(network)?.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Decodes a network from either the versioned or the legacy layout.
pub fn decode(text: &str) -> Result<Network> {
    let lines: Vec<(usize, &str)> = text.lines().enumerate().map(|(i, l)| (i + 1, l)).collect();

    let first = lines.first().map(|(_, l)| l.trim()).unwrap_or("");
    let (legacy, records) = match first.strip_prefix(FORMAT_MAGIC) {
        Some(version) => {
            let version = version.trim();
            if version != FORMAT_VERSION.to_string() {
                return Err(Error::parse(1, format!("unsupported format version {version:?}")));
            }
            (false, &lines[1..])
        }
        None => (true, &lines[..]),
    };

    if records.len() < 4 {
        let missing = ["layer count", "layer sizes", "weights", "biases"][records.len()];
        return Err(Error::parse(lines.len() + 1, format!("missing {missing} record")));
    }
    if let Some((line, _)) = records[4..].iter().find(|(_, l)| !l.trim().is_empty()) {
        return Err(Error::parse(*line, "unexpected content after the bias record"));
    }

    let (count_line, count_text) = records[0];
    let layer_count: usize = count_text
        .trim()
        .parse()
        .map_err(|_| Error::parse(count_line, format!("layer count {:?} is not an integer", count_text.trim())))?;

    let (sizes_line, sizes_text) = records[1];
    let layer_sizes: Vec<usize> = from_json(sizes_line, sizes_text)?;
    if layer_sizes.len() != layer_count {
        return Err(Error::parse(
            sizes_line,
            format!("layer count is {layer_count} but {} sizes are listed", layer_sizes.len()),
        ));
    }
    if layer_count < 2 || layer_sizes.contains(&0) {
        return Err(Error::parse(
            sizes_line,
            format!("invalid topology {layer_sizes:?}: need 2 or more non-empty layers"),
        ));
    }

    let (weights_line, weights_text) = records[2];
    let weights: Vec<Vec<Vec<f64>>> = from_json(weights_line, weights_text)?;

    let (biases_line, biases_text) = records[3];
    let biases: Vec<Option<Vec<f64>>> = if legacy {
        from_json(biases_line, &biases_text.replace("None", "null"))?
    } else {
        from_json(biases_line, biases_text)?
    };
    let biases = split_input_placeholder(biases_line, biases, &layer_sizes)?;

    let network = Network::from_parts(&layer_sizes, weights, biases)
        .map_err(|e| Error::parse(weights_line, e.to_string()))?;
    debug!("decoded network {layer_sizes:?} (legacy layout: {legacy})");
    Ok(network)
}

pub fn read_from<R: BufRead>(mut reader: R) -> Result<Network> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    decode(&text)
}

/// Drops the input layer's placeholder and checks every other entry's width.
fn split_input_placeholder(
    line: usize,
    biases: Vec<Option<Vec<f64>>>,
    layer_sizes: &[usize],
) -> Result<Vec<Vec<f64>>> {
    if biases.len() != layer_sizes.len() {
        return Err(Error::parse(
            line,
            format!("expected {} bias entries, got {}", layer_sizes.len(), biases.len()),
        ));
    }
    let mut entries = biases.into_iter();
    match entries.next() {
        Some(None) => {}
        Some(Some(b)) if b.is_empty() => {}
        _ => return Err(Error::parse(line, "the input layer cannot have biases")),
    }
    entries
        .zip(&layer_sizes[1..])
        .enumerate()
        .map(|(k, (b, &width))| match b {
            Some(b) if b.len() == width => Ok(b),
            Some(b) => Err(Error::parse(
                line,
                format!("layer {} has {width} neurons but {} biases", k + 1, b.len()),
            )),
            None => Err(Error::parse(line, format!("layer {} has no biases", k + 1))),
        })
        .collect()
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::InvalidData(e.to_string()))
}

fn from_json<T: DeserializeOwned>(line: usize, text: &str) -> Result<T> {
    serde_json::from_str(text.trim()).map_err(|e| Error::parse(line, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> Network {
        Network::from_parts(
            &[2, 1],
            vec![vec![vec![0.5], vec![-0.1]]],
            vec![vec![0.30000000000000004]],
        )
        .unwrap()
    }

    #[test]
    fn encodes_header_and_four_records() {
        let text = encode(&tiny()).unwrap();
        assert_eq!(
            text,
            "sigmoid-nn 1\n2\n[2,1]\n[[[0.5],[-0.1]]]\n[null,[0.30000000000000004]]\n"
        );
    }

    #[test]
    fn decode_is_bit_exact() {
        let net = Network::seeded(&[5, 7, 3], 99).unwrap();
        let back = decode(&encode(&net).unwrap()).unwrap();
        assert_eq!(back, net);
        for (a, b) in back.layers().iter().zip(net.layers()) {
            for (x, y) in a.weights.data.iter().flatten().zip(b.weights.data.iter().flatten()) {
                assert_eq!(x.to_bits(), y.to_bits());
            }
        }
    }

    #[test]
    fn reads_legacy_layout() {
        let text = "2\n[2, 1]\n[[[0.5], [-0.1]]]\n[None, [1e-05]]";
        let net = decode(text).unwrap();
        assert_eq!(net.layer_sizes(), &[2, 1]);
        assert_eq!(net.weight(0, 1, 0), -0.1);
        assert_eq!(net.bias(1, 0), 1e-05);
    }

    #[test]
    fn rejects_unknown_version() {
        let err = decode("sigmoid-nn 7\n2\n[2,1]\n[[[0.5],[0.1]]]\n[null,[0.0]]\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn malformed_records_report_their_line() {
        let cases = [
            ("sigmoid-nn 1\n2\n[2,1]\n[[[0.5],[0.1]]]\n", 5),
            ("sigmoid-nn 1\nx\n[2,1]\n[[[0.5],[0.1]]]\n[null,[0.0]]\n", 2),
            ("sigmoid-nn 1\n3\n[2,1]\n[[[0.5],[0.1]]]\n[null,[0.0]]\n", 3),
            ("sigmoid-nn 1\n2\n[2,1]\n[[[0.5]]]\n[null,[0.0]]\n", 4),
            ("sigmoid-nn 1\n2\n[2,1]\n[[[0.5],[0.1]]]\n[null,[0.0,1.0]]\n", 5),
            ("sigmoid-nn 1\n2\n[2,1]\n[[[0.5],[0.1]]]\n[[1.0],[0.0]]\n", 5),
            ("sigmoid-nn 1\n2\n[2,1]\n[[[0.5],[0.1]]]\n[null,null]\n", 5),
            ("sigmoid-nn 1\n2\n[2,1]\n[[[0.5],[0.1]]]\n[null,[0.0]]\n3\n", 6),
            ("sigmoid-nn 1\n2\n[2,0]\n[[[0.5],[0.1]]]\n[null,[0.0]]\n", 3),
        ];
        for (text, expected_line) in cases {
            match decode(text) {
                Err(Error::Parse { line, .. }) => assert_eq!(line, expected_line, "{text:?}"),
                other => panic!("{text:?}: unexpected result {other:?}"),
            }
        }
    }

    #[test]
    fn record_literals_are_never_evaluated() {
        let text = "sigmoid-nn 1\n2\n[2,1]\n[[[__import__('os')],[0.1]]]\n[null,[0.0]]\n";
        assert!(matches!(decode(text), Err(Error::Parse { line: 4, .. })));
    }
}
