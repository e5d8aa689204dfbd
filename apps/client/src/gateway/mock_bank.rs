//! Built-in sample data for the mock gateway: a small interview question
//! bank plus the tiered feedback text used by the mock AI scorer.

use crate::models::question::{CategoryGroup, Difficulty, FollowUp, Question, Resource};

/// Returns the full sample bank, freshly built on every call so callers can
/// own and mutate their copy.
pub fn sample_question_bank() -> Vec<CategoryGroup> {
    vec![
        CategoryGroup {
            category: "Networking".to_string(),
            questions: vec![
                Question {
                    id: "net1".to_string(),
                    text: "What are the OSI seven-layer and TCP/IP four-layer models, and how \
                           do they correspond to each other?"
                        .to_string(),
                    difficulty: Difficulty::Easy,
                    category: String::new(),
                    reference_answer: "OSI: physical, data link, network, transport, session, \
                                       presentation, application. TCP/IP: link, internet, \
                                       transport, application. OSI's top three layers map to \
                                       TCP/IP's application layer; transport maps to transport; \
                                       network to internet; data link and physical to the link \
                                       layer."
                        .to_string(),
                    resources: vec![Resource {
                        text: "OSI model explained".to_string(),
                        url: "https://en.wikipedia.org/wiki/OSI_model".to_string(),
                    }],
                    follow_ups: vec![FollowUp {
                        id: "net1_f1".to_string(),
                        text: "Name at least three common application-layer protocols in the \
                               TCP/IP model."
                            .to_string(),
                        reference_answer: "HTTP/HTTPS (web), FTP (file transfer), SMTP (mail \
                                           delivery), POP3/IMAP (mail retrieval), DNS (name \
                                           resolution)."
                            .to_string(),
                    }],
                    tags: vec!["osi".to_string(), "tcp-ip".to_string()],
                },
                Question {
                    id: "net2".to_string(),
                    text: "What are the common HTTP status code classes and what does each \
                           mean? Give at least five."
                        .to_string(),
                    difficulty: Difficulty::Medium,
                    category: String::new(),
                    reference_answer: "1xx informational (100 Continue); 2xx success (200 OK, \
                                       201 Created, 204 No Content); 3xx redirection (301, 302, \
                                       304); 4xx client errors (400, 401, 403, 404); 5xx server \
                                       errors (500, 502, 503)."
                        .to_string(),
                    resources: vec![Resource {
                        text: "HTTP status code reference".to_string(),
                        url: "https://developer.mozilla.org/docs/Web/HTTP/Status".to_string(),
                    }],
                    follow_ups: vec![],
                    tags: vec!["http".to_string()],
                },
            ],
        },
        CategoryGroup {
            category: "Data Structures & Algorithms".to_string(),
            questions: vec![Question {
                id: "ds1".to_string(),
                text: "What are quicksort's average and worst-case time complexities, and how \
                       can the worst case be mitigated?"
                    .to_string(),
                difficulty: Difficulty::Medium,
                category: String::new(),
                reference_answer: "Average O(n log n), worst case O(n²) when the pivot choice \
                                   degenerates on (nearly) sorted input. Mitigations: \
                                   median-of-three pivot selection, random pivots, and \
                                   switching the smaller partition to iteration to bound stack \
                                   depth."
                    .to_string(),
                resources: vec![],
                follow_ups: vec![],
                tags: vec!["sorting".to_string(), "complexity".to_string()],
            }],
        },
        CategoryGroup {
            category: "Operating Systems".to_string(),
            questions: vec![Question {
                id: "os1".to_string(),
                text: "Explain TCP's three-way handshake and four-way teardown, and the \
                       purpose of the TIME_WAIT state."
                    .to_string(),
                difficulty: Difficulty::Medium,
                category: String::new(),
                reference_answer: "The three-way handshake establishes that both ends can send \
                                   and receive; the four-way teardown lets each direction close \
                                   independently. TIME_WAIT keeps the closing end around long \
                                   enough to retransmit the final ACK and to let stray segments \
                                   from the old connection expire."
                    .to_string(),
                resources: vec![Resource {
                    text: "TCP connection management".to_string(),
                    url: "https://en.wikipedia.org/wiki/Transmission_Control_Protocol"
                        .to_string(),
                }],
                follow_ups: vec![FollowUp {
                    id: "os1_f1".to_string(),
                    text: "What happens on each side if the server's SYN-ACK is lost during \
                           the handshake?"
                        .to_string(),
                    reference_answer: "The client times out waiting for the SYN-ACK and \
                                       retransmits its SYN with exponential backoff, giving up \
                                       after a bounded number of attempts. The server, stuck in \
                                       SYN_RCVD, retransmits the SYN-ACK and eventually drops \
                                       the half-open connection."
                        .to_string(),
                }],
                tags: vec!["tcp".to_string()],
            }],
        },
    ]
}

pub struct MockFeedback {
    pub highlights: String,
    pub improvements: String,
    pub suggestions: String,
}

/// Score-dependent feedback text, mirroring the tiers the real scorer uses.
pub fn mock_feedback(score: u8) -> MockFeedback {
    if score >= 90 {
        MockFeedback {
            highlights: "Comprehensive coverage with a clear line of reasoning; the key \
                         concepts are explained precisely."
                .to_string(),
            improvements: "Consider contrasting the concept with related alternatives or \
                           exploring how it behaves in less common scenarios."
                .to_string(),
            suggestions: "Keep this level up and take on harder questions in the same area."
                .to_string(),
        }
    } else if score >= 80 {
        MockFeedback {
            highlights: "The core concepts are correct and the overall flow is clearly \
                         described."
                .to_string(),
            improvements: "Some details could be more complete, particularly boundary \
                           conditions and failure cases."
                .to_string(),
            suggestions: "Revisit the finer points of this topic and practice walking through \
                          concrete examples."
                .to_string(),
        }
    } else if score >= 60 {
        MockFeedback {
            highlights: "Several relevant concepts are mentioned, showing partial familiarity."
                .to_string(),
            improvements: "The core logic appears shaky in places and some explanations are \
                           imprecise."
                .to_string(),
            suggestions: "Compare your answer against the reference carefully and re-study the \
                          central mechanism."
                .to_string(),
        }
    } else {
        MockFeedback {
            highlights: "You identified which technical area the question belongs to."
                .to_string(),
            improvements: "Most key points are missing and the answer lacks structure."
                .to_string(),
            suggestions: "Work through the fundamentals of this module before retrying the \
                          question."
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_ids_are_unique() {
        let bank = sample_question_bank();
        let mut ids: Vec<&str> = bank
            .iter()
            .flat_map(|g| g.questions.iter().map(|q| q.id.as_str()))
            .collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn test_feedback_tiers_differ() {
        assert_ne!(mock_feedback(95).highlights, mock_feedback(55).highlights);
        assert_ne!(mock_feedback(85).suggestions, mock_feedback(65).suggestions);
    }
}
