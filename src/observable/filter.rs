/// Passes when there is no previous value or the value changed.
///
/// "No previous value" never compares equal, so the first delivery of a
/// subscription always passes.
pub fn distinct<T: PartialEq>(new: &T, old: Option<&T>) -> bool {
    old != Some(new)
}
