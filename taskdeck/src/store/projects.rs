//! Mirrored project list and the current project's members.

use taskdeck_api::project::{Project, ProjectId, ProjectMember};

/// Projects as last returned by the server, plus the member list of the
/// project currently being viewed (one detail view at a time).
#[derive(Debug, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
    members: Vec<ProjectMember>,
    detail: Option<ProjectId>,
}

impl ProjectStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the project list with a fresh server response.
    pub fn set(&mut self, projects: Vec<Project>) {
        self.projects = projects;
    }

    /// Appends a newly created project.
    pub fn insert(&mut self, project: Project) {
        self.projects.push(project);
    }

    /// Replaces the project with the same id, if present.
    pub fn replace(&mut self, project: Project) {
        if let Some(existing) = self.projects.iter_mut().find(|p| p.id == project.id) {
            *existing = project;
        }
    }

    /// Removes the project with the given id. Clears the detail view if
    /// it was showing that project.
    pub fn remove(&mut self, id: &ProjectId) {
        self.projects.retain(|p| p.id != *id);
        if self.detail.as_ref() == Some(id) {
            self.clear_detail();
        }
    }

    /// Installs the detail view: which project is open and its members.
    pub fn set_detail(&mut self, id: ProjectId, members: Vec<ProjectMember>) {
        self.detail = Some(id);
        self.members = members;
    }

    /// Leaves the detail view.
    pub fn clear_detail(&mut self) {
        self.detail = None;
        self.members.clear();
    }

    /// Replaces the member with the same membership id, if present.
    pub fn replace_member(&mut self, member: ProjectMember) {
        if let Some(existing) = self.members.iter_mut().find(|m| m.id == member.id) {
            *existing = member;
        }
    }

    /// Appends a newly added member.
    pub fn insert_member(&mut self, member: ProjectMember) {
        self.members.push(member);
    }

    /// Removes a member by membership id.
    pub fn remove_member(&mut self, member_id: &str) {
        self.members.retain(|m| m.id != member_id);
    }

    /// The current project list, in server order.
    #[must_use]
    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    /// Looks up a project by id.
    #[must_use]
    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == *id)
    }

    /// The project currently open in the detail view, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&ProjectId> {
        self.detail.as_ref()
    }

    /// Members of the project currently open in the detail view.
    #[must_use]
    pub fn members(&self) -> &[ProjectMember] {
        &self.members
    }
}
