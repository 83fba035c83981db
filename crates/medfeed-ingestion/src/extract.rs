//! PubMed efetch XML → [`ArticleRecord`] field extraction.
//!
//! The document is read with quick-xml. Each `<PubmedArticle>` is collected
//! into a small element tree and every field lookup runs inside that tree
//! only, so one record can never leak values into another. A record that
//! fails to parse or lacks a PMID is logged and dropped; the rest of the
//! batch carries on.

use chrono::{Datelike, Local, NaiveDate};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{AbstractSection, ArticleRecord, MAX_AUTHORS, MAX_KEYWORDS};

/// Title used when a record has no `<ArticleTitle>`.
pub const UNTITLED: &str = "Sin título";

/// Default minimum abstract length, in characters.
pub const DEFAULT_MIN_ABSTRACT_LEN: usize = 100;

const RECORD_TAG: &[u8] = b"PubmedArticle";

/// Extraction policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Records pass only when their abstract is strictly longer than this.
    /// `None` keeps every record.
    pub min_abstract_len: Option<usize>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { min_abstract_len: Some(DEFAULT_MIN_ABSTRACT_LEN) }
    }
}

impl ExtractOptions {
    /// Keep all records regardless of abstract length.
    pub fn keep_all() -> Self {
        Self { min_abstract_len: None }
    }

    pub fn accepts(&self, abstract_text: &str) -> bool {
        match self.min_abstract_len {
            Some(min) => abstract_text.chars().count() > min,
            None => true,
        }
    }
}

/// Why a single record was dropped.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("record has no PMID")]
    MissingIdentifier,
    #[error("malformed record XML: {0}")]
    Malformed(String),
}

// ── Element tree ──────────────────────────────────────────────────────────────

#[derive(Debug)]
enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug)]
struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self, RecordError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attrs = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| RecordError::Malformed(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
            attrs.push((key, value));
        }
        Ok(Self { name, attrs, children: Vec::new() })
    }

    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First descendant with the given name, in document order.
    fn find(&self, name: &str) -> Option<&Element> {
        for child in &self.children {
            if let Node::Element(el) = child {
                if el.name == name {
                    return Some(el);
                }
                if let Some(found) = el.find(name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// All descendants with the given name, in document order. Matches are
    /// not searched for nested matches.
    fn find_all<'a>(&'a self, name: &str, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            if let Node::Element(el) = child {
                if el.name == name {
                    out.push(el);
                } else {
                    el.find_all(name, out);
                }
            }
        }
    }

    fn all(&self, name: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        self.find_all(name, &mut out);
        out
    }

    /// Concatenated text of all descendants; inline markup is dropped.
    fn text(&self) -> String {
        let mut buf = String::new();
        self.collect_text(&mut buf);
        buf
    }

    fn collect_text(&self, buf: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => buf.push_str(t),
                Node::Element(el) => el.collect_text(buf),
            }
        }
    }

    /// Cleaned text of the first matching descendant, if non-empty.
    fn field(&self, name: &str) -> Option<String> {
        self.find(name)
            .map(|el| clean_text(&el.text()))
            .filter(|t| !t.is_empty())
    }
}

/// Collapse whitespace runs to single spaces and trim.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ── Document parsing ──────────────────────────────────────────────────────────

/// Parse an efetch document into records, applying `options`.
pub fn parse_pubmed_xml(xml: &str, options: &ExtractOptions) -> Vec<ArticleRecord> {
    parse_with_today(xml, options, Local::now().date_naive())
}

fn parse_with_today(xml: &str, options: &ExtractOptions, today: NaiveDate) -> Vec<ArticleRecord> {
    let mut records = Vec::new();
    let mut reader = Reader::from_str(xml);
    // Nesting is tracked on our own stack so a broken record can be
    // dropped without poisoning the reader for the records after it.
    reader.config_mut().check_end_names = false;

    let mut stack: Vec<Element> = Vec::new();

    loop {
        let before = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let is_record = e.name().as_ref() == RECORD_TAG;
                if stack.is_empty() && !is_record {
                    continue;
                }
                if is_record && !stack.is_empty() {
                    drop_record(&mut stack, &RecordError::Malformed("unclosed <PubmedArticle>".into()));
                }
                match Element::open(e) {
                    Ok(el) => stack.push(el),
                    Err(err) => drop_record(&mut stack, &err),
                }
            }
            Ok(Event::Empty(ref e)) => {
                if stack.is_empty() {
                    continue;
                }
                match Element::open(e) {
                    Ok(el) => push_child(&mut stack, Node::Element(el)),
                    Err(err) => drop_record(&mut stack, &err),
                }
            }
            Ok(Event::Text(ref t)) => {
                if stack.is_empty() {
                    continue;
                }
                let text = t
                    .unescape()
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(t).into_owned());
                push_child(&mut stack, Node::Text(text));
            }
            Ok(Event::CData(c)) => {
                if stack.is_empty() {
                    continue;
                }
                let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                push_child(&mut stack, Node::Text(text));
            }
            Ok(Event::End(ref e)) => {
                let Some(el) = stack.pop() else { continue };
                if e.name().as_ref() != el.name.as_bytes() {
                    let err = RecordError::Malformed(format!(
                        "expected </{}>, found </{}>",
                        el.name,
                        String::from_utf8_lossy(e.name().as_ref())
                    ));
                    drop_record(&mut stack, &err);
                    continue;
                }
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Element(el));
                } else {
                    match extract_record(&el, today) {
                        Ok(record) if options.accepts(&record.abstract_text) => records.push(record),
                        Ok(record) => debug!(
                            pmid = %record.identifier,
                            len = record.abstract_text.chars().count(),
                            "Skipping record with short abstract"
                        ),
                        Err(err) => warn!(error = %err, "Skipping unparseable PubMed record"),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                drop_record(&mut stack, &RecordError::Malformed(e.to_string()));
                if reader.buffer_position() == before {
                    break;
                }
            }
            _ => {}
        }
    }

    if !stack.is_empty() {
        warn!("PubMed XML ended inside a record; dropping it");
    }

    records
}

fn push_child(stack: &mut [Element], node: Node) {
    if let Some(top) = stack.last_mut() {
        top.children.push(node);
    }
}

fn drop_record(stack: &mut Vec<Element>, err: &RecordError) {
    if !stack.is_empty() {
        warn!(error = %err, "Dropping malformed PubMed record");
        stack.clear();
    } else {
        warn!(error = %err, "XML parse error outside any record");
    }
}

// ── Field extraction ──────────────────────────────────────────────────────────

fn extract_record(article: &Element, today: NaiveDate) -> Result<ArticleRecord, RecordError> {
    let identifier = article.field("PMID").ok_or(RecordError::MissingIdentifier)?;
    let title = article.field("ArticleTitle").unwrap_or_else(|| UNTITLED.to_string());
    let journal = article
        .find("Journal")
        .and_then(|j| j.field("Title"))
        .or_else(|| article.field("Title"))
        .unwrap_or_default();

    let abstract_sections = extract_abstract(article);
    let abstract_text = abstract_sections
        .iter()
        .map(AbstractSection::render)
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(ArticleRecord {
        identifier,
        title,
        abstract_text,
        abstract_sections,
        authors: extract_authors(article),
        publication_date: publication_date(article.find("PubDate"), today),
        journal,
        doi: extract_doi(article),
        keywords: extract_keywords(article),
    })
}

fn extract_abstract(article: &Element) -> Vec<AbstractSection> {
    let Some(block) = article.find("Abstract") else {
        return Vec::new();
    };

    block
        .all("AbstractText")
        .into_iter()
        .filter_map(|segment| {
            let text = clean_text(&segment.text());
            if text.is_empty() {
                return None;
            }
            let label = segment
                .attr("Label")
                .map(clean_text)
                .filter(|l| !l.is_empty());
            Some(AbstractSection { label, text })
        })
        .collect()
}

fn extract_authors(article: &Element) -> Vec<String> {
    article
        .all("Author")
        .into_iter()
        .take(MAX_AUTHORS)
        .filter_map(|author| {
            let last = author.field("LastName")?;
            Some(match author.field("ForeName") {
                Some(fore) => format!("{fore} {last}"),
                None => last,
            })
        })
        .collect()
}

fn extract_doi(article: &Element) -> Option<String> {
    let by_type = |tag: &str, attr: &str| {
        article
            .all(tag)
            .into_iter()
            .find(|el| el.attr(attr).is_some_and(|t| t.eq_ignore_ascii_case("doi")))
            .map(|el| clean_text(&el.text()))
            .filter(|doi| !doi.is_empty())
    };

    by_type("ArticleId", "IdType").or_else(|| by_type("ELocationID", "EIdType"))
}

fn extract_keywords(article: &Element) -> Vec<String> {
    article
        .all("Keyword")
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|kw| clean_text(&kw.text()))
        .filter(|kw| !kw.is_empty())
        .collect()
}

fn medline_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(\d{4})(?:\s+([A-Za-z]+|\d{1,2}))?").expect("static regex")
    })
}

/// `YYYY-MM-DD` from a `<PubDate>` block. Year defaults to the current year,
/// month and day to `01`; no block at all yields today's date.
fn publication_date(block: Option<&Element>, today: NaiveDate) -> String {
    let Some(block) = block else {
        return today.format("%Y-%m-%d").to_string();
    };

    let mut year = block.field("Year");
    let mut month = block.field("Month");
    let day = block.field("Day");

    if year.is_none() {
        if let Some(medline) = block.field("MedlineDate") {
            if let Some(caps) = medline_date_re().captures(&medline) {
                year = caps.get(1).map(|m| m.as_str().to_string());
                if month.is_none() {
                    month = caps.get(2).map(|m| m.as_str().to_string());
                }
            }
        }
    }

    let year = year
        .and_then(|y| y.parse::<i32>().ok())
        .unwrap_or_else(|| today.year());
    let month = month.as_deref().and_then(resolve_month).unwrap_or(1);
    let day = day.and_then(|d| d.parse::<u32>().ok()).unwrap_or(1);

    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 1))
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string()
}

/// Month number from `03`, `3`, `Mar`, `March` or `mar.`.
fn resolve_month(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    let prefix: String = raw
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .take(3)
        .collect();
    prefix
        .parse::<chrono::Month>()
        .ok()
        .map(|m| m.number_from_month())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_ABSTRACT: &str = "Artificial intelligence models were trained on a large cohort of \
        panoramic radiographs to detect caries lesions with clinically useful accuracy.";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn article(pmid: &str, inner: &str) -> String {
        format!(
            "<PubmedArticle><MedlineCitation><PMID Version=\"1\">{pmid}</PMID>{inner}</MedlineCitation></PubmedArticle>"
        )
    }

    fn set(articles: &[String]) -> String {
        format!(
            "<?xml version=\"1.0\"?>\n<PubmedArticleSet>{}</PubmedArticleSet>",
            articles.concat()
        )
    }

    fn parse_all(xml: &str) -> Vec<ArticleRecord> {
        parse_with_today(xml, &ExtractOptions::keep_all(), today())
    }

    #[test]
    fn test_parse_minimal_pubmed_xml() {
        let xml = r#"<?xml version="1.0"?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>12345678</PMID>
      <Article>
        <Journal><Title>Journal of Dentistry</Title></Journal>
        <ArticleTitle>Deep learning for caries detection</ArticleTitle>
        <Abstract><AbstractText>Test abstract.</AbstractText></Abstract>
        <AuthorList>
          <Author><LastName>Smith</LastName><ForeName>John</ForeName></Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

        let records = parse_all(xml);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.identifier, "12345678");
        assert_eq!(r.title, "Deep learning for caries detection");
        assert_eq!(r.journal, "Journal of Dentistry");
        assert_eq!(r.abstract_text, "Test abstract.");
        assert_eq!(r.authors, vec!["John Smith"]);
        assert_eq!(r.doi, None);
    }

    #[test]
    fn test_month_name_and_number_resolve() {
        let jan = article("1", "<Article><Journal><JournalIssue><PubDate><Year>2024</Year><Month>Jan</Month><Day>5</Day></PubDate></JournalIssue></Journal></Article>");
        let mar = article("2", "<Article><Journal><JournalIssue><PubDate><Year>2023</Year><Month>03</Month></PubDate></JournalIssue></Journal></Article>");
        let records = parse_all(&set(&[jan, mar]));
        assert_eq!(records[0].publication_date, "2024-01-05");
        assert_eq!(records[1].publication_date, "2023-03-01");
    }

    #[test]
    fn test_missing_month_and_day_default_to_first() {
        let xml = set(&[article("1", "<Article><Journal><JournalIssue><PubDate><Year>2025</Year></PubDate></JournalIssue></Journal></Article>")]);
        assert_eq!(parse_all(&xml)[0].publication_date, "2025-01-01");
    }

    #[test]
    fn test_missing_year_uses_current_year() {
        let xml = set(&[article("1", "<Article><PubDate><Month>September</Month></PubDate></Article>")]);
        assert_eq!(parse_all(&xml)[0].publication_date, "2026-09-01");
    }

    #[test]
    fn test_missing_pub_date_block_uses_today() {
        let xml = set(&[article("1", "<Article><ArticleTitle>No date</ArticleTitle></Article>")]);
        assert_eq!(parse_all(&xml)[0].publication_date, "2026-10-19");
    }

    #[test]
    fn test_medline_date_fallback() {
        let xml = set(&[article("1", "<Article><PubDate><MedlineDate>2022 Nov-Dec</MedlineDate></PubDate></Article>")]);
        assert_eq!(parse_all(&xml)[0].publication_date, "2022-11-01");
    }

    #[test]
    fn test_impossible_day_falls_back_to_first() {
        let xml = set(&[article("1", "<Article><PubDate><Year>2023</Year><Month>Feb</Month><Day>30</Day></PubDate></Article>")]);
        assert_eq!(parse_all(&xml)[0].publication_date, "2023-02-01");
    }

    #[test]
    fn test_dates_are_valid_calendar_dates() {
        let xml = set(&[
            article("1", "<Article><PubDate><Year>2024</Year><Month>Spring</Month></PubDate></Article>"),
            article("2", "<Article><PubDate><Year>2024</Year><Month>13</Month><Day>x</Day></PubDate></Article>"),
            article("3", "<Article><PubDate><Year>2024</Year><Month>Dec</Month><Day>31</Day></PubDate></Article>"),
        ]);
        for r in parse_all(&xml) {
            assert!(
                NaiveDate::parse_from_str(&r.publication_date, "%Y-%m-%d").is_ok(),
                "invalid date {}",
                r.publication_date
            );
            assert_eq!(r.publication_date.len(), 10);
        }
    }

    #[test]
    fn test_labelled_abstract_segments_joined_by_blank_line() {
        let xml = set(&[article(
            "1",
            r#"<Article><Abstract>
                <AbstractText Label="BACKGROUND" NlmCategory="BACKGROUND">AI is   spreading.</AbstractText>
                <AbstractText Label="METHODS">We reviewed <i>50</i> studies.</AbstractText>
            </Abstract></Article>"#,
        )]);
        let r = &parse_all(&xml)[0];
        assert_eq!(
            r.abstract_text,
            "BACKGROUND: AI is spreading.\n\nMETHODS: We reviewed 50 studies."
        );
        assert_eq!(r.abstract_sections.len(), 2);
        assert_eq!(r.abstract_sections[1].label.as_deref(), Some("METHODS"));
        assert_eq!(r.abstract_plain(), "AI is spreading. We reviewed 50 studies.");
    }

    #[test]
    fn test_other_abstract_is_not_used() {
        let xml = set(&[article(
            "1",
            "<Article/><OtherAbstract><AbstractText>Resumen en español.</AbstractText></OtherAbstract>",
        )]);
        assert_eq!(parse_all(&xml)[0].abstract_text, "");
    }

    #[test]
    fn test_abstract_length_filter_boundary() {
        let exactly_100 = "a".repeat(100);
        let just_over = "b".repeat(101);
        let xml = set(&[
            article("1", &format!("<Article><Abstract><AbstractText>{exactly_100}</AbstractText></Abstract></Article>")),
            article("2", &format!("<Article><Abstract><AbstractText>{just_over}</AbstractText></Abstract></Article>")),
        ]);

        let filtered = parse_with_today(&xml, &ExtractOptions::default(), today());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].identifier, "2");

        let unfiltered = parse_with_today(&xml, &ExtractOptions::keep_all(), today());
        assert_eq!(unfiltered.len(), 2);
    }

    #[test]
    fn test_authors_capped_and_last_name_required() {
        let authors: String = [
            "<Author><LastName>García</LastName><ForeName>Ana</ForeName></Author>",
            "<Author><CollectiveName>AI Dental Consortium</CollectiveName></Author>",
            "<Author><LastName>Okafor</LastName></Author>",
            "<Author><LastName>Lee</LastName><ForeName>Min</ForeName></Author>",
            "<Author><LastName>Rossi</LastName><ForeName>Luca</ForeName></Author>",
            "<Author><LastName>Sixth</LastName><ForeName>Never</ForeName></Author>",
        ]
        .concat();
        let xml = set(&[article("1", &format!("<Article><AuthorList>{authors}</AuthorList></Article>"))]);
        let r = &parse_all(&xml)[0];
        assert_eq!(r.authors, vec!["Ana García", "Okafor", "Min Lee", "Luca Rossi"]);
    }

    #[test]
    fn test_keywords_capped_at_ten() {
        let keywords: String = (1..=12)
            .map(|i| format!("<Keyword MajorTopicYN=\"N\">kw{i}</Keyword>"))
            .collect();
        let xml = set(&[article("1", &format!("<KeywordList>{keywords}</KeywordList>"))]);
        let r = &parse_all(&xml)[0];
        assert_eq!(r.keywords.len(), MAX_KEYWORDS);
        assert_eq!(r.keywords[0], "kw1");
        assert_eq!(r.keywords[9], "kw10");
    }

    #[test]
    fn test_doi_from_article_id_list() {
        let xml = "<PubmedArticleSet><PubmedArticle><MedlineCitation><PMID>7</PMID></MedlineCitation>\
             <PubmedData><ArticleIdList><ArticleId IdType=\"pubmed\">7</ArticleId>\
             <ArticleId IdType=\"doi\">10.1000/xyz.123</ArticleId></ArticleIdList></PubmedData>\
             </PubmedArticle></PubmedArticleSet>";
        assert_eq!(parse_all(xml)[0].doi.as_deref(), Some("10.1000/xyz.123"));
    }

    #[test]
    fn test_doi_falls_back_to_elocation_id() {
        let xml = set(&[article(
            "1",
            "<Article><ELocationID EIdType=\"pii\" ValidYN=\"Y\">S0300</ELocationID><ELocationID EIdType=\"doi\" ValidYN=\"Y\">10.1016/j.jdent.2024.1</ELocationID></Article>",
        )]);
        assert_eq!(parse_all(&xml)[0].doi.as_deref(), Some("10.1016/j.jdent.2024.1"));
    }

    #[test]
    fn test_missing_title_uses_placeholder_and_inline_markup_is_stripped() {
        let xml = set(&[
            article("1", "<Article/>"),
            article("2", "<Article><ArticleTitle>CT &amp; MRI with <sup>18</sup>F-FDG\n   imaging</ArticleTitle></Article>"),
        ]);
        let records = parse_all(&xml);
        assert_eq!(records[0].title, UNTITLED);
        assert_eq!(records[1].title, "CT & MRI with 18F-FDG imaging");
    }

    #[test]
    fn test_malformed_record_does_not_abort_batch() {
        let good_a = article("1", &format!("<Article><ArticleTitle>First</ArticleTitle><Abstract><AbstractText>{LONG_ABSTRACT}</AbstractText></Abstract></Article>"));
        let broken = "<PubmedArticle><MedlineCitation><PMID>2</PMID><Article><ArticleTitle>Broken</Journal></Article></MedlineCitation></PubmedArticle>".to_string();
        let good_b = article("3", &format!("<Article><ArticleTitle>Third</ArticleTitle><Abstract><AbstractText>{LONG_ABSTRACT}</AbstractText></Abstract></Article>"));

        let records = parse_with_today(&set(&[good_a, broken, good_b]), &ExtractOptions::default(), today());
        let ids: Vec<_> = records.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_unclosed_record_does_not_swallow_following_records() {
        let truncated = "<PubmedArticle><MedlineCitation><PMID Version=\"1\">1</PMID><Article><ArticleTitle>Cut</ArticleTitle>".to_string();
        let xml = set(&[truncated, article("2", ""), article("3", "")]);
        let ids: Vec<_> = parse_all(&xml).into_iter().map(|r| r.identifier).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_record_without_pmid_is_dropped() {
        let xml = "<PubmedArticleSet><PubmedArticle><MedlineCitation><Article><ArticleTitle>Orphan</ArticleTitle></Article></MedlineCitation></PubmedArticle></PubmedArticleSet>";
        assert!(parse_all(xml).is_empty());
    }

    #[test]
    fn test_first_pmid_wins_over_comment_corrections() {
        let xml = set(&[article(
            "111",
            "<CommentsCorrectionsList><CommentsCorrections><PMID>999</PMID></CommentsCorrections></CommentsCorrectionsList>",
        )]);
        assert_eq!(parse_all(&xml)[0].identifier, "111");
    }

    #[test]
    fn test_empty_document_yields_no_records() {
        assert!(parse_all("").is_empty());
        assert!(parse_all("<PubmedArticleSet></PubmedArticleSet>").is_empty());
    }

    #[test]
    fn test_resolve_month() {
        assert_eq!(resolve_month("Jan"), Some(1));
        assert_eq!(resolve_month("sept"), Some(9));
        assert_eq!(resolve_month("December"), Some(12));
        assert_eq!(resolve_month("03"), Some(3));
        assert_eq!(resolve_month("0"), None);
        assert_eq!(resolve_month("Spring"), None);
    }
}
