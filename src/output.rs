//! CSV export of the final posting list.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::extractor::Posting;

/// Column layout read by the static table viewer.
#[derive(Debug, Serialize)]
struct PostingRow<'a> {
    #[serde(rename = "Company")]
    company: &'a str,
    #[serde(rename = "Role")]
    role: &'a str,
    #[serde(rename = "Experience")]
    experience: &'a str,
    #[serde(rename = "Location")]
    location: &'a str,
    #[serde(rename = "Link")]
    link: &'a str,
}

impl<'a> From<&'a Posting> for PostingRow<'a> {
    fn from(posting: &'a Posting) -> Self {
        Self {
            company: &posting.company,
            role: &posting.title,
            experience: "",
            location: &posting.location,
            link: &posting.link,
        }
    }
}

pub fn write_csv<W: Write>(writer: W, postings: &[Posting]) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    if postings.is_empty() {
        // serde only emits the header alongside the first record
        csv.write_record(["Company", "Role", "Experience", "Location", "Link"])?;
    }
    for posting in postings {
        csv.serialize(PostingRow::from(posting))?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_csv_file(path: &Path, postings: &[Posting]) -> Result<(), csv::Error> {
    write_csv(File::create(path)?, postings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(company: &str, title: &str, link: &str, location: &str) -> Posting {
        Posting {
            company: company.to_string(),
            title: title.to_string(),
            link: link.to_string(),
            location: location.to_string(),
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let mut out = Vec::new();
        write_csv(
            &mut out,
            &[
                posting("Acme", "Backend Engineer", "https://acme.example/jobs/1", "Germany"),
                posting("Widgets, Inc.", "Analyst \"Data\"", "https://w.example/2", ""),
            ],
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Company,Role,Experience,Location,Link\n\
             Acme,Backend Engineer,,Germany,https://acme.example/jobs/1\n\
             \"Widgets, Inc.\",\"Analyst \"\"Data\"\"\",,,https://w.example/2\n"
        );
    }

    #[test]
    fn empty_list_still_has_header() {
        let mut out = Vec::new();
        write_csv(&mut out, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Company,Role,Experience,Location,Link\n"
        );
    }
}
