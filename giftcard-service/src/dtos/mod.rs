use serde_json::Value;

/// Body of `POST /card`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CardRequest {
    pub card_no: String,
    pub pin: String,
}

impl CardRequest {
    /// Decode a request body leniently.
    ///
    /// Only the first JSON value is read; anything after it is ignored. An
    /// undecodable first value yields an empty request. Keys match
    /// case-insensitively in document order, and a value that is not a string
    /// leaves the field as it was, so field validation is what reports a bad
    /// body.
    pub fn from_body(body: &[u8]) -> Self {
        let first = serde_json::Deserializer::from_slice(body)
            .into_iter::<Value>()
            .next();

        let fields = match first {
            Some(Ok(Value::Object(fields))) => fields,
            Some(Ok(_)) | None => return Self::default(),
            Some(Err(err)) => {
                tracing::debug!(error = %err, "Undecodable card request body");
                return Self::default();
            }
        };

        let mut request = Self::default();
        for (key, value) in &fields {
            let slot = if key.eq_ignore_ascii_case("card_no") {
                &mut request.card_no
            } else if key.eq_ignore_ascii_case("pin") {
                &mut request.pin
            } else {
                continue;
            };
            if let Some(value) = value.as_str() {
                *slot = value.to_string();
            }
        }
        request
    }

    /// Card number reduced to its last four digits, for logging.
    pub fn masked_card_no(&self) -> String {
        let chars: Vec<char> = self.card_no.chars().collect();
        let visible = chars.len().min(4);
        let hidden = chars.len() - visible;
        let tail: String = chars[hidden..].iter().collect();
        format!("{}{}", "*".repeat(hidden), tail)
    }
}
