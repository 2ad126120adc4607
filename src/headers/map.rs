use std::slice;

/// Case-insensitive HTTP header collection.
///
/// Names are normalized to lowercase on insertion. Entries keep their insertion order, so
/// writing the same collection twice produces the same bytes.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Headers {
    fields: Vec<Field>,
}

#[derive(Clone, PartialEq, Eq)]
struct Field {
    name: String,
    value: String,
}

impl Headers {
    /// Create new empty [`Headers`].
    ///
    /// This function does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Create new empty [`Headers`] with at least the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { fields: Vec::with_capacity(capacity) }
    }

    /// Returns the number of headers.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if there is no headers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|field| field.name.eq_ignore_ascii_case(name))
    }

    /// Returns `true` if the collection contains a header with given name.
    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the value of the header with given name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        let idx = self.position(name)?;
        Some(&self.fields[idx].value)
    }

    /// Insert a header value.
    ///
    /// If the name is already present, `value` is appended to the existing value separated by
    /// `,`, following the rules for combining repeated field lines.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.position(name) {
            Some(idx) => {
                let field = &mut self.fields[idx].value;
                field.push(',');
                field.push_str(value);
            }
            None => self.fields.push(Field {
                name: name.to_ascii_lowercase(),
                value: value.to_owned(),
            }),
        }
    }

    /// Insert a header value, overwriting any existing value with the same name.
    pub fn replace(&mut self, name: &str, value: &str) {
        match self.position(name) {
            Some(idx) => {
                let field = &mut self.fields[idx].value;
                field.clear();
                field.push_str(value);
            }
            None => self.fields.push(Field {
                name: name.to_ascii_lowercase(),
                value: value.to_owned(),
            }),
        }
    }

    /// Remove a header, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.position(name)?;
        Some(self.fields.remove(idx).value)
    }

    /// Remove all headers, keeping the allocated capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Returns an iterator over `(name, value)` pairs in insertion order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.fields.iter() }
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a str, &'a str);

    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for Headers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// ===== Iterator =====

/// Iterator over header entries, created by [`Headers::iter`].
#[derive(Debug)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, Field>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|field| (field.name.as_str(), field.value.as_str()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}
