use crate::preload::Filter;

///
/// Finder
///
/// Caller-supplied batch fetch. Appends every record matching `filter`
/// to `out`, which is always empty on entry. Called at most once per
/// preload.
///
/// Any `FnMut(&mut Vec<T>, &Filter)` is a finder.
///

pub trait Finder<T> {
    fn find(&mut self, out: &mut Vec<T>, filter: &Filter);
}

impl<T, F> Finder<T> for F
where
    F: FnMut(&mut Vec<T>, &Filter),
{
    fn find(&mut self, out: &mut Vec<T>, filter: &Filter) {
        self(out, filter);
    }
}
