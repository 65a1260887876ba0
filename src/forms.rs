use std::fmt;

/// Validation failure for a screen's form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// One or more required fields are empty. Carries the screen's alert text.
    MissingFields(&'static str),
    InvalidEmail,
    InvalidPhone,
}

impl FieldError {
    pub fn message(&self) -> &'static str {
        match self {
            FieldError::MissingFields(msg) => msg,
            FieldError::InvalidEmail => {
                "Please enter a valid email address containing '@'."
            }
            FieldError::InvalidPhone => "Phone number must be exactly 10 digits.",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for FieldError {}

/// Phone numbers are exactly 10 ASCII digits.
pub fn valid_phone(num: &str) -> bool {
    num.len() == 10 && num.chars().all(|c| c.is_ascii_digit())
}

/// Email must be `local@domain` with a dot inside the domain and no
/// whitespace or second `@` anywhere.
pub fn valid_email(mail: &str) -> bool {
    if mail.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = mail.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Registration wizard step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegisterStep {
    #[default]
    Info,
    FaceCapture,
}

/// Registration screen fields plus the two-step wizard state.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub step: RegisterStep,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.name.is_empty()
            || self.email.is_empty()
            || self.phone.is_empty()
            || self.password.is_empty()
        {
            return Err(FieldError::MissingFields(
                "Please fill in all fields (Name, Email, Phone, Password).",
            ));
        }
        if !valid_email(&self.email) {
            return Err(FieldError::InvalidEmail);
        }
        if !valid_phone(&self.phone) {
            return Err(FieldError::InvalidPhone);
        }
        Ok(())
    }

    /// Info → FaceCapture, gated by validation. A no-op when already on the
    /// capture step.
    pub fn advance(&mut self) -> Result<(), FieldError> {
        self.validate()?;
        self.step = RegisterStep::FaceCapture;
        Ok(())
    }

    /// FaceCapture → Info, never gated.
    pub fn back(&mut self) {
        self.step = RegisterStep::Info;
    }

    /// Full reset after a successful registration: empty fields, step 1.
    pub fn reset(&mut self) {
        *self = RegisterForm::default();
    }
}

/// Login screen fields. The CAPTCHA answer lives here; the challenge itself
/// is only a cache-busted image reference owned by the backend.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub name: String,
    pub password: String,
    pub captcha_answer: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.name.is_empty() || self.password.is_empty() || self.captcha_answer.is_empty()
        {
            return Err(FieldError::MissingFields(
                "Please fill in all fields including CAPTCHA.",
            ));
        }
        Ok(())
    }

    /// The wire form of the CAPTCHA answer: trimmed and uppercased.
    pub fn normalized_captcha(&self) -> String {
        self.captcha_answer.trim().to_uppercase()
    }

    /// Rejected-login recovery: the stale challenge answer is dropped,
    /// name and password survive for the retry.
    pub fn clear_captcha(&mut self) {
        self.captcha_answer.clear();
    }
}

/// Voting screen fields. `voter_name` arrives via the login handoff but
/// stays editable, matching the original flow.
#[derive(Debug, Clone, Default)]
pub struct VoteForm {
    pub voter_name: String,
    pub candidate_id: Option<String>,
}

impl VoteForm {
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.voter_name.trim().is_empty() {
            return Err(FieldError::MissingFields(
                "Please enter your name before voting.",
            ));
        }
        if self.candidate_id.is_none() {
            return Err(FieldError::MissingFields("Please select a candidate."));
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = VoteForm::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_register() -> RegisterForm {
        RegisterForm {
            step: RegisterStep::Info,
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: "9876543210".into(),
            password: "secret".into(),
        }
    }

    #[test]
    fn phone_accepts_exactly_ten_digits() {
        assert!(valid_phone("0123456789"));
        assert!(!valid_phone("123456789"));
        assert!(!valid_phone("12345678901"));
        assert!(!valid_phone("12345abcde"));
        assert!(!valid_phone("12345 6789"));
        assert!(!valid_phone(""));
    }

    #[test]
    fn email_needs_domain_with_dot() {
        assert!(valid_email("a@b.com"));
        assert!(valid_email("first.last@mail.example.org"));
        assert!(!valid_email("a@b"));
        assert!(!valid_email("ab.com"));
        assert!(!valid_email("@b.com"));
        assert!(!valid_email("a@.com"));
        assert!(!valid_email("a@b."));
        assert!(!valid_email("a b@c.com"));
        assert!(!valid_email("a@b@c.com"));
    }

    #[test]
    fn register_rejects_any_empty_field() {
        let clears: [fn(&mut RegisterForm); 4] = [
            |f| f.name.clear(),
            |f| f.email.clear(),
            |f| f.phone.clear(),
            |f| f.password.clear(),
        ];
        for clear in clears {
            let mut form = filled_register();
            clear(&mut form);
            assert!(matches!(
                form.validate(),
                Err(FieldError::MissingFields(_))
            ));
        }
    }

    #[test]
    fn register_wizard_advances_only_when_valid() {
        let mut form = filled_register();
        form.email = "not-an-address".into();
        assert_eq!(form.advance(), Err(FieldError::InvalidEmail));
        assert_eq!(form.step, RegisterStep::Info);

        form.email = "asha@example.com".into();
        assert_eq!(form.advance(), Ok(()));
        assert_eq!(form.step, RegisterStep::FaceCapture);

        form.back();
        assert_eq!(form.step, RegisterStep::Info);
    }

    #[test]
    fn register_reset_returns_to_step_one_with_empty_fields() {
        let mut form = filled_register();
        form.advance().unwrap();
        form.reset();
        assert_eq!(form.step, RegisterStep::Info);
        assert!(form.name.is_empty());
        assert!(form.email.is_empty());
        assert!(form.phone.is_empty());
        assert!(form.password.is_empty());
    }

    #[test]
    fn login_requires_captcha_answer() {
        let mut form = LoginForm {
            name: "Asha".into(),
            password: "secret".into(),
            captcha_answer: String::new(),
        };
        assert!(form.validate().is_err());
        form.captcha_answer = "ab12z".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn captcha_answer_is_trimmed_and_uppercased() {
        let form = LoginForm {
            captcha_answer: "  ab12z ".into(),
            ..LoginForm::default()
        };
        assert_eq!(form.normalized_captcha(), "AB12Z");
    }

    #[test]
    fn rejected_login_clears_only_the_captcha() {
        let mut form = LoginForm {
            name: "Asha".into(),
            password: "secret".into(),
            captcha_answer: "AB12Z".into(),
        };
        form.clear_captcha();
        assert!(form.captcha_answer.is_empty());
        assert_eq!(form.name, "Asha");
        assert_eq!(form.password, "secret");
    }

    #[test]
    fn vote_requires_name_and_selection() {
        let mut form = VoteForm::default();
        assert!(form.validate().is_err());
        form.voter_name = "   ".into();
        assert!(form.validate().is_err());
        form.voter_name = "Asha".into();
        assert!(form.validate().is_err());
        form.candidate_id = Some("65f0".into());
        assert!(form.validate().is_ok());
    }
}
