use super::domain::{Staff, StaffId, StaffingError};

/// Owns every staff record, in creation order.
#[derive(Debug, Default, Clone)]
pub struct StaffRegistry {
    members: Vec<Staff>,
    last_id: u64,
}

impl StaffRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a registry from already-validated records.
    pub(crate) fn from_members(members: Vec<Staff>) -> Self {
        let last_id = members.iter().map(|staff| staff.id.0).max().unwrap_or(0);
        Self { members, last_id }
    }

    pub fn create(&mut self, name: impl Into<String>) -> &Staff {
        self.last_id += 1;
        let index = self.members.len();
        self.members
            .push(Staff::new(StaffId(self.last_id), name.into()));
        &self.members[index]
    }

    pub fn get(&self, id: StaffId) -> Option<&Staff> {
        self.members.iter().find(|staff| staff.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: StaffId) -> Option<&mut Staff> {
        self.members.iter_mut().find(|staff| staff.id == id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn list(&self) -> Vec<&Staff> {
        self.members.iter().collect()
    }

    pub fn untrained(&self) -> Vec<&Staff> {
        self.members.iter().filter(|staff| !staff.trained).collect()
    }

    /// Trained staff with no current assignment.
    pub fn available(&self) -> Vec<&Staff> {
        self.members
            .iter()
            .filter(|staff| staff.is_available())
            .collect()
    }

    pub fn assigned(&self) -> Vec<&Staff> {
        self.members
            .iter()
            .filter(|staff| staff.assigned_course.is_some())
            .collect()
    }

    /// Marks a staff member as trained. Training someone twice is not an error.
    ///
    /// Returns `true` when the flag actually changed.
    pub fn train(&mut self, id: StaffId) -> Result<bool, StaffingError> {
        let staff = self.get_mut(id).ok_or(StaffingError::StaffNotFound(id))?;
        let changed = !staff.trained;
        staff.trained = true;
        Ok(changed)
    }

    pub(crate) fn members(&self) -> &[Staff] {
        &self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_allocates_sequential_ids_and_starts_untrained() {
        let mut registry = StaffRegistry::new();
        let first = registry.create("Ada").id();
        let second = registry.create("Grace").id();

        assert_eq!(first, StaffId(1));
        assert_eq!(second, StaffId(2));
        let ada = registry.get(first).expect("staff present");
        assert!(!ada.is_trained());
        assert_eq!(ada.assigned_course(), None);
    }

    #[test]
    fn from_members_resumes_id_sequence() {
        let mut registry = StaffRegistry::from_members(vec![
            Staff::new(StaffId(4), "Linus".to_string()),
            Staff::new(StaffId(9), "Barbara".to_string()),
        ]);

        assert_eq!(registry.create("Ken").id(), StaffId(10));
    }

    #[test]
    fn train_unknown_staff_is_not_found() {
        let mut registry = StaffRegistry::new();
        assert_eq!(
            registry.train(StaffId(7)),
            Err(StaffingError::StaffNotFound(StaffId(7)))
        );
    }
}
