use std::fmt::Display;

pub trait ResultExt<T, InitialError> {
    /// Map an error to a string-based error variant
    ///
    /// Turns `Result<T, InitialError>` into `Result<T, FinalError>` where FinalError has a variant
    /// holding a String, built from the Display implementation of InitialError.
    ///
    /// # Example
    /// ```rust
    /// use hce_util::result_ext::ResultExt;
    ///
    /// #[derive(Debug)]
    /// enum StoreError {
    ///     Open(String),
    /// }
    ///
    /// fn example() -> Result<String, StoreError> {
    ///     std::fs::read_to_string("missing-ndef-message.txt").map_err_str(StoreError::Open)
    /// }
    ///
    /// assert!(matches!(example(), Err(StoreError::Open(_))));
    /// ```
    fn map_err_str<FinalError, F>(self, f: F) -> Result<T, FinalError>
    where
        InitialError: Display,
        F: FnOnce(String) -> FinalError;
}

impl<Type, InitialError> ResultExt<Type, InitialError> for Result<Type, InitialError> {
    fn map_err_str<FinalError, F>(self, f: F) -> Result<Type, FinalError>
    where
        InitialError: Display,
        F: FnOnce(String) -> FinalError,
    {
        self.map_err(|e| f(e.to_string()))
    }
}
