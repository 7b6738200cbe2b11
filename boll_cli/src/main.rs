use boll_core::{compute_bollinger_bands, BandPoint, BollingerConfig, Candle, PriceSource};
use chrono::{DateTime, NaiveDateTime};
use csv::Reader;
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: boll_cli <data-file> [length] [multiplier] [offset] [source]");
        std::process::exit(2);
    }

    let mut config = BollingerConfig::default();
    if let Some(v) = args.get(2) {
        config.length = v.parse()?;
    }
    if let Some(v) = args.get(3) {
        config.std_dev_multiplier = v.parse()?;
    }
    if let Some(v) = args.get(4) {
        config.offset = v.parse()?;
    }
    if let Some(v) = args.get(5) {
        config.source = PriceSource::from_str(v)?;
    }
    config.validate()?;

    let path = Path::new(&args[1]);
    process_file(path, &config)?;

    Ok(())
}

fn process_file(path: &Path, config: &BollingerConfig) -> Result<(), Box<dyn Error>> {
    let file = File::open(path)?;
    let mut candles = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => load_json(file)?,
        Some("csv") => load_csv(file)?,
        other => return Err(format!("unsupported data file extension: {other:?}").into()),
    };

    // Sort by timestamp and repair inconsistent high/low bounds
    candles.sort_by_key(|c| c.timestamp);
    for candle in &mut candles {
        candle.check(true)?;
    }

    let bands = compute_bollinger_bands(&candles, config)?;

    for (candle, point) in candles.iter().zip(bands.iter()) {
        println!("{}  {}", format_timestamp(candle.timestamp), format_point(point));
    }

    println!("Processed file: {path:?}");
    println!("Number of bars: {}", candles.len());
    if let (Some(first), Some(last)) = (candles.first(), candles.last()) {
        println!("First timestamp: {}", format_timestamp(first.timestamp));
        println!("Last timestamp: {}", format_timestamp(last.timestamp));
    }

    Ok(())
}

/// JSON transport: an array of OHLCV objects.
fn load_json(reader: impl Read) -> Result<Vec<Candle>, Box<dyn Error>> {
    let candles: Vec<Candle> = serde_json::from_reader(reader)?;
    Ok(candles)
}

/// CSV transport: `timestamp,open,high,low,close,volume` with a header row.
fn load_csv(reader: impl Read) -> Result<Vec<Candle>, Box<dyn Error>> {
    let mut rdr = Reader::from_reader(reader);
    let mut candles = Vec::new();

    for result in rdr.records() {
        let record = result?;
        candles.push(parse_csv_record(&record)?);
    }

    Ok(candles)
}

fn parse_csv_record(record: &csv::StringRecord) -> Result<Candle, Box<dyn Error>> {
    // Timestamp is either epoch milliseconds or a formatted datetime
    let timestamp = match record[0].parse::<i64>() {
        Ok(ms) => ms,
        Err(_) => NaiveDateTime::parse_from_str(&record[0], "%Y-%m-%d %H:%M:%S")?
            .and_utc()
            .timestamp_millis(),
    };

    Ok(Candle::new(
        timestamp,
        record[1].parse()?,
        record[2].parse()?,
        record[3].parse()?,
        record[4].parse()?,
        record[5].parse()?,
    ))
}

fn format_timestamp(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// Undefined points print as a gap rather than zeros.
fn format_point(point: &BandPoint) -> String {
    if point.is_defined() {
        format!(
            "upper={:.4}  basis={:.4}  lower={:.4}",
            point.upper, point.basis, point.lower
        )
    } else {
        "-".to_string()
    }
}
