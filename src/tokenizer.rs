
// imports
use crate::error::Result;

use std::io::{BufRead, ErrorKind};

/// The token emitted for a line break that is not attached to a word.
pub const SENTENCE_END: &[u8] = b"</s>";


/// Reads whitespace separated words from a byte stream.
///
/// Space, tab and line feed separate words and carriage returns are dropped.
/// A line feed that ends a word is held back so the following call reports
/// it as a `</s>` token. Words longer than `max_string_len` bytes are
/// truncated.
pub struct WordReader<R> {
    reader: R,
    max_string_len: usize,
    pushed_back: Option<u8>,
}

impl<R: BufRead> WordReader<R> {

    pub fn new(reader: R, max_string_len: usize) -> Self {
        Self {
            reader,
            max_string_len,
            pushed_back: None
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {

        if let Some(byte) = self.pushed_back.take() {
            return Ok(Some(byte));
        }

        loop {
            let byte = match self.reader.fill_buf() {
                Ok(buf) => buf.first().copied(),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into())
            };
            if byte.is_some() {
                self.reader.consume(1);
            }
            return Ok(byte);
        }
    }

    /// Returns the next word, or `None` once the stream is exhausted.
    pub fn read_word(&mut self) -> Result<Option<Vec<u8>>> {

        let mut word: Vec<u8> = Vec::new();

        while let Some(byte) = self.next_byte()? {
            match byte {
                b'\r' => continue,
                b' ' | b'\t' | b'\n' => {
                    if !word.is_empty() {
                        if byte == b'\n' {
                            self.pushed_back = Some(byte);
                        }
                        break;
                    }
                    if byte == b'\n' {
                        return Ok(Some(SENTENCE_END.to_vec()));
                    }
                },
                _ => {
                    if word.len() < self.max_string_len {
                        word.push(byte);
                    }
                }
            }
        }

        if word.is_empty() {
            Ok(None)
        } else {
            Ok(Some(word))
        }
    }

}

impl<R: BufRead> Iterator for WordReader<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_word().transpose()
    }
}


#[cfg(test)]
mod tests {

    use super::{WordReader, SENTENCE_END};

    fn words(text: &str, max_string_len: usize) -> Vec<String> {
        WordReader::new(text.as_bytes(), max_string_len)
            .map(|w| String::from_utf8(w.unwrap()).unwrap())
            .collect()
    }

    #[test]
    fn single_line_test() {
        assert_eq!(words("x\n", 100), vec!["x", "</s>"]);
    }

    #[test]
    fn boundaries_test() {

        let text = "line1word1 line1word2\tline1word3\r\nline2word1\n\nline4word1  \t \nline6word1 line6word2";
        let expected = vec![
            "line1word1", "line1word2", "line1word3", "</s>",
            "line2word1", "</s>", "</s>",
            "line4word1", "</s>",
            "line6word1", "line6word2",
        ];
        assert_eq!(words(text, 100), expected);
    }

    #[test]
    fn empty_and_blank_streams_test() {
        assert!(words("", 100).is_empty());
        assert!(words(" \t \r  ", 100).is_empty());
        assert_eq!(words("\n", 100), vec!["</s>"]);
    }

    #[test]
    fn carriage_return_inside_word_test() {
        assert_eq!(words("ab\rcd", 100), vec!["abcd"]);
    }

    #[test]
    fn truncation_test() {

        let max_string_len = 100;
        let long_word = "q".repeat(max_string_len + 10);
        let text = format!("{}\nshort", long_word);

        let mut reader = WordReader::new(text.as_bytes(), max_string_len);
        let first = reader.read_word().unwrap().unwrap();
        assert_eq!(first.len(), max_string_len);
        assert_eq!(reader.read_word().unwrap().unwrap(), SENTENCE_END);
        assert_eq!(reader.read_word().unwrap().unwrap(), b"short");
        assert!(reader.read_word().unwrap().is_none());
        assert!(reader.read_word().unwrap().is_none());
    }

}
