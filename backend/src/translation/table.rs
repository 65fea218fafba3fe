//! Static English -> Gujarati token dictionary used when the remote
//! translator is unavailable.

use std::collections::{BTreeMap, HashMap};

use crate::config::ProtectedTerm;

/// Built-in entries. Keys are lowercase.
const BUILTIN_WORDS: &[(&str, &str)] = &[
    // titles
    ("bhai", "ભાઈ"),
    ("ben", "બેન"),
    ("shri", "શ્રી"),
    // surnames
    ("patel", "પટેલ"),
    ("desai", "દેસાઈ"),
    ("shah", "શાહ"),
    ("modi", "મોદી"),
    ("joshi", "જોશી"),
    ("dave", "દવે"),
    ("mehta", "મેહતા"),
    ("trivedi", "ત્રિવેદી"),
    ("pandya", "પંડ્યા"),
    ("sharma", "શર્મા"),
    ("parikh", "પારીખ"),
    ("vyas", "વ્યાસ"),
    ("amin", "અમીન"),
    ("thakkar", "ઠક્કર"),
    ("solanki", "સોલંકી"),
    ("raval", "રાવલ"),
    ("bhatt", "ભટ્ટ"),
    ("bhavsar", "ભાવસાર"),
    ("choksi", "ચોકસી"),
    ("dalal", "દલાલ"),
    ("gandhi", "ગાંધી"),
    ("kapadia", "કપાડિયા"),
    ("mistry", "મિસ્ત્રી"),
    ("panchal", "પંચાલ"),
    ("rathod", "રાઠોડ"),
    ("sanghvi", "સંઘવી"),
    ("vora", "વોરા"),
    // first names
    ("ramesh", "રમેશ"),
    ("mahesh", "મહેશ"),
    ("suresh", "સુરેશ"),
    ("mukesh", "મુકેશ"),
    ("rajesh", "રાજેશ"),
    ("paresh", "પરેશ"),
    ("nilesh", "નિલેશ"),
    ("hitesh", "હિતેશ"),
    ("jignesh", "જિગ્નેશ"),
    ("dipak", "દિપક"),
    ("amit", "અમિત"),
    ("vijay", "વિજય"),
    ("ajay", "અજય"),
    ("sanjay", "સંજય"),
    ("jayesh", "જયેશ"),
    ("manish", "મનિષ"),
    ("ravi", "રવિ"),
    ("prakash", "પ્રકાશ"),
    ("ashok", "અશોક"),
    ("vinod", "વિનોદ"),
    ("anil", "અનિલ"),
    ("kishore", "કિશોર"),
    ("bharat", "ભરત"),
    ("kiran", "કિરણ"),
    ("yogesh", "યોગેશ"),
    ("naresh", "નરેશ"),
    ("dinesh", "દિનેશ"),
    ("sandip", "સંદીપ"),
    ("harish", "હરીશ"),
    ("jagdish", "જગદીશ"),
    ("girish", "ગિરીશ"),
    ("sarthak", "સાર્થક"),
    ("vasudha", "વસુધા"),
    ("kalpana", "કલ્પના"),
    ("anita", "અનિતા"),
    ("meera", "મીરા"),
    ("geeta", "ગીતા"),
    ("sita", "સીતા"),
    ("nisha", "નિશા"),
    ("priya", "પ્રિયા"),
    ("kavita", "કવિતા"),
    ("nita", "નીતા"),
    ("rita", "રીતા"),
    ("mita", "મીતા"),
    ("lata", "લતા"),
    ("asha", "આશા"),
    ("usha", "ઉષા"),
    ("rekha", "રેખા"),
    ("shobha", "શોભા"),
    ("manjula", "મંજુલા"),
    ("sarita", "સરિતા"),
    ("sunita", "સુનિતા"),
    ("kanta", "કાંતા"),
    ("pramila", "પ્રમિલા"),
    ("sharda", "શારદા"),
    ("kokila", "કોકિલા"),
    ("hansa", "હંસા"),
    ("leela", "લીલા"),
    ("maya", "માયા"),
    ("neeta", "નીતા"),
    ("vaishali", "વૈશાલી"),
    ("bharti", "ભારતી"),
    ("dipti", "દીપ્તી"),
];

#[derive(Debug, Clone)]
pub struct FallbackTable {
    words: HashMap<String, String>,
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FallbackTable {
    pub fn builtin() -> Self {
        let words = BUILTIN_WORDS
            .iter()
            .map(|(en, gu)| (en.to_string(), gu.to_string()))
            .collect();
        Self { words }
    }

    /// Built-in words, then `extra` entries, then protected terms. Later
    /// layers win on conflicts.
    pub fn with_overrides(extra: &BTreeMap<String, String>, protected: &[ProtectedTerm]) -> Self {
        let mut table = Self::builtin();
        for (en, gu) in extra {
            table.insert(en, gu);
        }
        for term in protected {
            table.insert(&term.english, &term.gujarati);
        }
        table
    }

    pub fn insert(&mut self, english: &str, gujarati: &str) {
        self.words
            .insert(english.trim().to_lowercase(), gujarati.to_string());
    }

    /// Case-insensitive single-token lookup.
    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.words.get(&token.to_lowercase()).map(String::as_str)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Word-by-word rendering of `name`.
    ///
    /// Tokens are split on whitespace and rejoined with a single space;
    /// unknown tokens are kept as typed. When no token is known the input is
    /// returned untouched.
    pub fn transliterate(&self, name: &str) -> String {
        let mut matched = false;
        let tokens: Vec<&str> = name
            .split_whitespace()
            .map(|token| match self.lookup(token) {
                Some(gu) => {
                    matched = true;
                    gu
                }
                None => token,
            })
            .collect();

        if matched {
            tokens.join(" ")
        } else {
            name.to_string()
        }
    }
}
