//! Ordered keyword rules for the assistant
//!
//! The priority order is data, not a conditional chain: the message is
//! lower-cased and the first group with a matching keyword wins.

/// What a matched rule answers about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    RecordCount,
    ColumnCount,
    NumericColumnCount,
    Average,
    Maximum,
    Minimum,
    Trend,
    Help,
}

/// One keyword group
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub topic: Topic,
    pub keywords: &'static [&'static str],
}

/// Keyword groups in priority order; first match wins
pub static RULES: &[Rule] = &[
    Rule {
        topic: Topic::RecordCount,
        keywords: &["total", "quantos", "registros"],
    },
    Rule {
        topic: Topic::ColumnCount,
        keywords: &["coluna", "campos"],
    },
    Rule {
        topic: Topic::NumericColumnCount,
        keywords: &["numéric", "número"],
    },
    Rule {
        topic: Topic::Average,
        keywords: &["média", "médio"],
    },
    Rule {
        topic: Topic::Maximum,
        keywords: &["máximo", "maior"],
    },
    Rule {
        topic: Topic::Minimum,
        keywords: &["mínimo", "menor"],
    },
    Rule {
        topic: Topic::Trend,
        keywords: &["tendência", "padrão"],
    },
    Rule {
        topic: Topic::Help,
        keywords: &["ajuda", "help"],
    },
];

/// Match a free-text message against the rule table
pub fn match_topic(message: &str) -> Option<Topic> {
    let lower = message.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|rule| rule.topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(match_topic("Qual o TOTAL de vendas?"), Some(Topic::RecordCount));
        assert_eq!(match_topic("MÉDIA por favor"), Some(Topic::Average));
    }

    #[test]
    fn test_first_group_wins() {
        // "registros" (record count) outranks "média" (average)
        assert_eq!(
            match_topic("qual a média de registros?"),
            Some(Topic::RecordCount)
        );
        // "coluna" outranks "máximo"
        assert_eq!(
            match_topic("qual coluna tem o máximo?"),
            Some(Topic::ColumnCount)
        );
    }

    #[test]
    fn test_unmatched_messages_fall_through() {
        assert_eq!(match_topic("bom dia"), None);
    }
}
