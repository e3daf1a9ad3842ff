/// One or more place ids, so a single id and a list read the same at call sites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceIds(Vec<String>);

impl PlaceIds {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for PlaceIds {
    fn from(place_id: &str) -> Self {
        PlaceIds(vec![place_id.into()])
    }
}

impl From<String> for PlaceIds {
    fn from(place_id: String) -> Self {
        PlaceIds(vec![place_id])
    }
}

impl<S: Into<String>> From<Vec<S>> for PlaceIds {
    fn from(place_ids: Vec<S>) -> Self {
        PlaceIds(place_ids.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for PlaceIds {
    fn from(place_ids: [S; N]) -> Self {
        PlaceIds(place_ids.into_iter().map(Into::into).collect())
    }
}

impl<S: Clone + Into<String>> From<&[S]> for PlaceIds {
    fn from(place_ids: &[S]) -> Self {
        PlaceIds(place_ids.iter().cloned().map(Into::into).collect())
    }
}
