//! In-memory form state.
//!
//! Each widget owns one [`FormDocument`]: fields, values, per-field error
//! slots, and the busy flag. No state is shared between forms.

/// How a field is entered and checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldControl {
    Text,
    Email,
    File,
}

/// A file selected for upload.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// One form field and its current state.
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub control: FieldControl,
    pub value: String,
    pub file: Option<FileUpload>,
    pub error: Option<String>,
}

impl FormField {
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldControl::Text)
    }

    pub fn email(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldControl::Email)
    }

    pub fn file(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldControl::File)
    }

    fn new(name: impl Into<String>, label: impl Into<String>, control: FieldControl) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required: false,
            control,
            value: String::new(),
            file: None,
            error: None,
        }
    }

    /// Mark as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// One form: target endpoint, fields, CSRF token, and busy flag.
#[derive(Debug, Clone)]
pub struct FormDocument {
    /// Endpoint path the form posts to, e.g. "/forms/contact".
    pub action: String,

    fields: Vec<FormField>,

    /// Hidden CSRF token value, injected after each token fetch.
    token: String,

    busy: bool,
}

impl FormDocument {
    /// Create an empty form targeting an endpoint path.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            fields: Vec::new(),
            token: String::new(),
            busy: false,
        }
    }

    /// Add a field.
    pub fn field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    /// The site's contact form.
    pub fn contact() -> Self {
        Self::new("/forms/contact")
            .field(FormField::text("name", "Name").required())
            .field(FormField::email("email", "Email").required())
            .field(FormField::text("subject", "Subject").required())
            .field(FormField::text("message", "Message").required())
    }

    /// The job application form.
    pub fn career() -> Self {
        Self::new("/forms/career")
            .field(FormField::text("name", "Name").required())
            .field(FormField::email("email", "Email").required())
            .field(FormField::text("phone", "Phone").required())
            .field(FormField::text("position", "Position").required())
            .field(FormField::text("experience", "Years of Experience"))
            .field(FormField::text("message", "Message"))
            .field(FormField::file("resume", "Resume"))
    }

    /// The RFQ form.
    pub fn rfq() -> Self {
        Self::new("/forms/rfq")
            .field(FormField::text("name", "Name").required())
            .field(FormField::email("email", "Email").required())
            .field(FormField::text("company", "Company").required())
            .field(FormField::text("service", "Service").required())
            .field(FormField::text("details", "Details").required())
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [FormField] {
        &mut self.fields
    }

    /// Set a field's text value.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.value = value.into();
        }
    }

    /// Attach a file to a file field.
    pub fn attach(&mut self, name: &str, file: FileUpload) {
        if let Some(field) = self
            .fields
            .iter_mut()
            .find(|f| f.name == name && f.control == FieldControl::File)
        {
            field.file = Some(file);
        }
    }

    /// Inject a freshly fetched CSRF token.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether a submission is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Clear all per-field error state.
    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.error = None;
        }
    }

    /// Paint one error message per named field.
    pub fn apply_errors<'a>(&mut self, errors: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (name, message) in errors {
            if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
                field.error = Some(message.to_string());
            }
        }
    }

    /// Reset to the pristine state: values, files, errors, and token.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.file = None;
            field.error = None;
        }
        self.token.clear();
    }
}
