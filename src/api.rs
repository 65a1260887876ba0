use serde::{Deserialize, Serialize};

/// Backend origin. Fixed development endpoint; the service owns all
/// credential, face-match, CAPTCHA and tally logic.
const API_BASE: &str = "http://localhost:5000";

pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

/// Application-level verdict of a submission. `Rejected` carries the
/// server-provided message verbatim; transport failures are `Err` at the
/// call site instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected(String),
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    /// JPEG data URI of the captured face photo.
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
    pub image: String,
    pub captcha_input: String,
}

#[derive(Debug, Serialize)]
pub struct VoteRequest {
    pub voter_name: String,
    pub candidate_id: String,
}

/// `{status}` on success, `{error}` on rejection. Shared by /register and
/// /login, which differ only in the expected status string.
#[derive(Debug, Deserialize)]
struct StatusReply {
    status: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VoteReply {
    success: Option<bool>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ElectionStatusReply {
    election_status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TallyRow {
    pub candidate_id: String,
    pub candidate_name: String,
    pub votes: i64,
}

/// /results answers with either the tally array or `{error}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResultsReply {
    Rows(Vec<TallyRow>),
    Failure { error: String },
}

/// Cache-bust token for the CAPTCHA challenge; epoch milliseconds, so every
/// refresh requests a distinct challenge.
pub fn cache_bust() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub fn captcha_url(cache_bust: i64) -> String {
    format!("{API_BASE}/captcha?cb={cache_bust}")
}

/// HTTP client for the voting backend. The cookie store is load-bearing:
/// the server binds the CAPTCHA answer to a session cookie set by /captcha,
/// which /login must send back.
#[derive(Clone)]
pub struct Backend {
    http: reqwest::Client,
}

impl Backend {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build HTTP client");
        Self { http }
    }

    /// Fetch a fresh CAPTCHA challenge image (PNG bytes).
    pub async fn fetch_captcha(&self, cache_bust: i64) -> Result<Vec<u8>, BackendError> {
        let resp = self.http.get(captcha_url(cache_bust)).send().await?;
        if !resp.status().is_success() {
            return Err(format!("CAPTCHA fetch failed: HTTP {}", resp.status()).into());
        }
        Ok(resp.bytes().await?.to_vec())
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<SubmitOutcome, BackendError> {
        let resp = self
            .http
            .post(format!("{API_BASE}/register"))
            .json(req)
            .send()
            .await?;
        let ok = resp.status().is_success();
        let body: StatusReply = resp.json().await?;
        if ok && body.status.as_deref() == Some("registered") {
            Ok(SubmitOutcome::Accepted)
        } else {
            Ok(SubmitOutcome::Rejected(
                body.error.unwrap_or_else(|| "Unknown error".into()),
            ))
        }
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<SubmitOutcome, BackendError> {
        let resp = self
            .http
            .post(format!("{API_BASE}/login"))
            .json(req)
            .send()
            .await?;
        let ok = resp.status().is_success();
        let body: StatusReply = resp.json().await?;
        if ok && body.status.as_deref() == Some("login success") {
            Ok(SubmitOutcome::Accepted)
        } else {
            Ok(SubmitOutcome::Rejected(
                body.error.unwrap_or_else(|| "Login failed.".into()),
            ))
        }
    }

    pub async fn candidates(&self) -> Result<Vec<Candidate>, BackendError> {
        let resp = self.http.get(format!("{API_BASE}/candidates")).send().await?;
        if !resp.status().is_success() {
            return Err(format!("Candidate fetch failed: HTTP {}", resp.status()).into());
        }
        Ok(resp.json().await?)
    }

    pub async fn vote(&self, req: &VoteRequest) -> Result<SubmitOutcome, BackendError> {
        let resp = self
            .http
            .post(format!("{API_BASE}/vote"))
            .json(req)
            .send()
            .await?;
        let ok = resp.status().is_success();
        let body: VoteReply = resp.json().await?;
        if ok && body.success == Some(true) {
            Ok(SubmitOutcome::Accepted)
        } else {
            Ok(SubmitOutcome::Rejected(
                body.error.unwrap_or_else(|| "Unknown error".into()),
            ))
        }
    }

    /// One-shot election state probe: "open" or "closed".
    pub async fn election_status(&self) -> Result<String, BackendError> {
        let resp = self
            .http
            .get(format!("{API_BASE}/election_status"))
            .send()
            .await?;
        let body: ElectionStatusReply = resp.json().await?;
        Ok(body.election_status)
    }

    /// Tally collection; only meaningful once the election is closed. An
    /// `{error}` body surfaces as Err like any other failed fetch.
    pub async fn results(&self) -> Result<Vec<TallyRow>, BackendError> {
        let resp = self.http.get(format!("{API_BASE}/results")).send().await?;
        match resp.json().await? {
            ResultsReply::Rows(rows) => Ok(rows),
            ResultsReply::Failure { error } => Err(error.into()),
        }
    }

    /// Fetch a candidate's symbol image from its absolute URL.
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, BackendError> {
        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(format!("Image fetch failed: HTTP {}", resp.status()).into());
        }
        Ok(resp.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn captcha_urls_differ_per_token() {
        let a = captcha_url(1700000000001);
        let b = captcha_url(1700000000002);
        assert_ne!(a, b);
        assert!(a.ends_with("/captcha?cb=1700000000001"));
    }

    #[test]
    fn login_request_uses_wire_field_names() {
        let req = LoginRequest {
            name: "Asha".into(),
            password: "secret".into(),
            image: "data:image/jpeg;base64,xyz".into(),
            captcha_input: "AB12Z".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["captcha_input"], "AB12Z");
        assert_eq!(value["image"], "data:image/jpeg;base64,xyz");
    }

    #[test]
    fn vote_request_uses_wire_field_names() {
        let req = VoteRequest {
            voter_name: "Asha".into(),
            candidate_id: "65f0".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["voter_name"], "Asha");
        assert_eq!(value["candidate_id"], "65f0");
    }

    #[test]
    fn status_reply_parses_both_shapes() {
        let ok: StatusReply =
            serde_json::from_value(json!({"status": "login success"})).unwrap();
        assert_eq!(ok.status.as_deref(), Some("login success"));
        assert!(ok.error.is_none());

        let err: StatusReply =
            serde_json::from_value(json!({"error": "Incorrect CAPTCHA"})).unwrap();
        assert!(err.status.is_none());
        assert_eq!(err.error.as_deref(), Some("Incorrect CAPTCHA"));
    }

    #[test]
    fn candidate_maps_mongo_id() {
        let c: Candidate = serde_json::from_value(json!({
            "_id": "65f0ab",
            "name": "River Party",
            "symbol": "http://localhost:5000/static/river.png"
        }))
        .unwrap();
        assert_eq!(c.id, "65f0ab");
        assert_eq!(c.name, "River Party");
        assert!(c.symbol.is_some());

        let bare: Candidate =
            serde_json::from_value(json!({"_id": "65f0ac", "name": "Hill Party"})).unwrap();
        assert!(bare.symbol.is_none());
    }

    #[test]
    fn results_reply_is_rows_or_error() {
        let rows: ResultsReply = serde_json::from_value(json!([
            {"candidate_id": "65f0ab", "candidate_name": "River Party", "votes": 12}
        ]))
        .unwrap();
        match rows {
            ResultsReply::Rows(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].votes, 12);
            }
            ResultsReply::Failure { .. } => panic!("expected rows"),
        }

        let failure: ResultsReply =
            serde_json::from_value(json!({"error": "No results available"})).unwrap();
        assert!(matches!(failure, ResultsReply::Failure { .. }));

        let empty: ResultsReply = serde_json::from_value(json!([])).unwrap();
        match empty {
            ResultsReply::Rows(rows) => assert!(rows.is_empty()),
            ResultsReply::Failure { .. } => panic!("empty tally is not an error"),
        }
    }

    #[test]
    fn election_status_reply_parses() {
        let reply: ElectionStatusReply =
            serde_json::from_value(json!({"election_status": "closed"})).unwrap();
        assert_eq!(reply.election_status, "closed");
    }
}
