//! Strategies for settling the name of a duplicated parameter

/// Decides the final name of a duplicate parameter
///
/// All names are passed and returned without the `$` sigil.
pub trait NameConfirmer {
    /// `old_name` is the parameter being duplicated, `declaration` the name of
    /// the method or function it belongs to.
    fn confirm(&mut self, old_name: &str, declaration: &str, suggested: &str) -> String;
}

impl<C: NameConfirmer + ?Sized> NameConfirmer for &mut C {
    fn confirm(&mut self, old_name: &str, declaration: &str, suggested: &str) -> String {
        (**self).confirm(old_name, declaration, suggested)
    }
}

impl<C: NameConfirmer + ?Sized> NameConfirmer for Box<C> {
    fn confirm(&mut self, old_name: &str, declaration: &str, suggested: &str) -> String {
        (**self).confirm(old_name, declaration, suggested)
    }
}

/// Non-interactive strategy: always take the suggestion
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptSuggestion;

impl NameConfirmer for AcceptSuggestion {
    fn confirm(&mut self, _old_name: &str, _declaration: &str, suggested: &str) -> String {
        suggested.to_string()
    }
}

/// Strategy backed by a closure, see [`from_fn`]
pub struct FnConfirmer<F>(F);

/// Build a `NameConfirmer` from a closure `(old_name, declaration, suggested) -> name`
pub fn from_fn<F>(f: F) -> FnConfirmer<F>
where
    F: FnMut(&str, &str, &str) -> String,
{
    FnConfirmer(f)
}

impl<F> NameConfirmer for FnConfirmer<F>
where
    F: FnMut(&str, &str, &str) -> String,
{
    fn confirm(&mut self, old_name: &str, declaration: &str, suggested: &str) -> String {
        (self.0)(old_name, declaration, suggested)
    }
}
