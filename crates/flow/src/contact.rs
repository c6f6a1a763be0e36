/// Messaging deep link revealed after a successful qualification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLink {
    phone: String,
    text: String,
}

impl ContactLink {
    pub const BASE_URL: &'static str = "https://wa.me";

    pub fn new(phone: impl Into<String>, text: impl Into<String>) -> Self {
        let phone = phone
            .into()
            .chars()
            .filter(char::is_ascii_digit)
            .collect::<String>();

        Self {
            phone,
            text: text.into(),
        }
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn url(&self) -> String {
        if self.text.trim().is_empty() {
            return format!("{}/{}", Self::BASE_URL, self.phone);
        }

        format!(
            "{}/{}?text={}",
            Self::BASE_URL,
            self.phone,
            urlencoding::encode(&self.text)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_prefilled_text() {
        let link = ContactLink::new(
            "5511994760149",
            "Oi William, acabei de passar pela triagem e quero saber como começar",
        );
        assert_eq!(
            link.url(),
            "https://wa.me/5511994760149?text=Oi%20William%2C%20acabei%20de%20passar%20pela%20triagem%20e%20quero%20saber%20como%20come%C3%A7ar"
        );
    }

    #[test]
    fn strips_phone_formatting() {
        let link = ContactLink::new("+55 (11) 99476-0149", "");
        assert_eq!(link.phone(), "5511994760149");
        assert_eq!(link.url(), "https://wa.me/5511994760149");
    }
}
