//! Presentation helpers for [`Mailbox`]

use crate::error::Result;
use crate::mail_address::{HeaderEncoding, MailAddress};
use crate::mailbox::Mailbox;

impl Mailbox {
    /// General format, or `""` for the empty sentinel.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        if self.address().is_empty() {
            String::new()
        } else {
            self.general()
        }
    }

    #[must_use]
    pub fn has_display_name(&self) -> bool {
        self.display_name().is_some_and(|name| !name.is_empty())
    }

    /// Text before the first `@` of the address.
    #[must_use]
    pub fn username(&self) -> &str {
        self.address()
            .split_once('@')
            .map_or(self.address(), |(user, _)| user)
    }

    /// Text after the first `@` of the address.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.address()
            .split_once('@')
            .map_or("", |(_, domain)| domain)
    }

    /// Alias of [`Mailbox::domain`].
    #[must_use]
    pub fn host(&self) -> &str {
        self.domain()
    }

    /// Convert to a [`MailAddress`] carrying this mailbox's display name.
    pub fn to_mail_address(&self) -> Result<MailAddress> {
        MailAddress::new(self.address(), self.display_name())
    }

    /// Convert to a [`MailAddress`] with `display_name` in place of this
    /// mailbox's own; a blank or missing override leaves it without a name.
    pub fn to_mail_address_with_name(&self, display_name: Option<&str>) -> Result<MailAddress> {
        MailAddress::new(self.address(), display_name)
    }

    /// Like [`Mailbox::to_mail_address_with_name`], choosing the header
    /// encoding of the display name.
    pub fn to_mail_address_with_encoding(
        &self,
        display_name: Option<&str>,
        encoding: HeaderEncoding,
    ) -> Result<MailAddress> {
        MailAddress::with_encoding(self.address(), display_name, encoding)
    }
}
