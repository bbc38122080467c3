use crate::error::{RankingError, Result};
use crate::types::DailyStats;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Writes one compact JSON object per line.
pub fn write_rankings<W: Write>(mut writer: W, days: &[DailyStats]) -> Result<()> {
    for day in days {
        serde_json::to_writer(&mut writer, day)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the rankings to it.
pub fn write_rankings_file(path: &Path, days: &[DailyStats]) -> Result<()> {
    let file = File::create(path)?;
    write_rankings(BufWriter::new(file), days)?;
    info!("Wrote {} daily rankings to {}", days.len(), path.display());
    Ok(())
}

/// Reads NDJSON rankings, skipping blank lines.
pub fn read_rankings<R: BufRead>(reader: R) -> Result<Vec<DailyStats>> {
    let mut days = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let day: DailyStats = serde_json::from_str(line)
            .map_err(|source| RankingError::InvalidLine { line: idx + 1, source })?;
        days.push(day);
    }
    debug!("read {} daily records", days.len());
    Ok(days)
}

/// Reads from a file, or stdin when `input` is absent or `-`.
pub fn read_rankings_from(input: Option<&Path>) -> Result<Vec<DailyStats>> {
    match input {
        None => read_rankings(io::stdin().lock()),
        Some(path) if path.as_os_str() == "-" => read_rankings(io::stdin().lock()),
        Some(path) => {
            let file = File::open(path)?;
            read_rankings(BufReader::new(file))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContributorRank;

    fn sample() -> Vec<DailyStats> {
        vec![DailyStats {
            date: "2024-01-01".to_string(),
            origin: "https://example.com/<repo>&.git".to_string(),
            tags: vec!["v1".to_string()],
            contributors: vec![ContributorRank {
                login: "ann".to_string(),
                email: None,
                cumulative_commits: 1,
                commits_today: 1,
                rank: 1,
            }],
        }]
    }

    #[test]
    fn writes_one_line_per_day_without_html_escaping() {
        let mut buf = Vec::new();
        let mut days = sample();
        let next = DailyStats {
            date: "2024-01-02".to_string(),
            ..days[0].clone()
        };
        days.push(next);
        write_rankings(&mut buf, &days).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with('\n'));
        assert!(text.contains("<repo>&"));
    }

    #[test]
    fn skips_blank_lines_and_whitespace() {
        let input = "\n  {\"date\":\"2024-01-01\",\"contributors\":[]}  \n\n{\"date\":\"2024-01-02\"}\n";
        let days = read_rankings(input.as_bytes()).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[1].date, "2024-01-02");
    }

    #[test]
    fn bad_line_reports_line_number() {
        let input = "{\"date\":\"2024-01-01\"}\n\nnot json\n";
        match read_rankings(input.as_bytes()) {
            Err(RankingError::InvalidLine { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected InvalidLine, got {other:?}"),
        }
    }

    #[test]
    fn output_reads_back() {
        let mut buf = Vec::new();
        write_rankings(&mut buf, &sample()).unwrap();
        assert_eq!(read_rankings(buf.as_slice()).unwrap(), sample());
    }
}
