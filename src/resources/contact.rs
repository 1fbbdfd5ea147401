//! Contact resources

use crate::client::{ApiResponse, Client, RequestOptions};
use crate::error::Result;
use crate::pagination::{PageRequest, PageStream};
use crate::types::Method;

const USERS_BY_DEPARTMENT: &str = "/open-apis/contact/v3/users/find_by_department";
const USER: &str = "/open-apis/contact/v3/users/:user_id";
const DEPARTMENT_CHILDREN: &str = "/open-apis/contact/v3/departments/:department_id/children";

/// `contact` namespace
#[derive(Debug, Clone, Copy)]
pub struct Contact<'a> {
    client: &'a Client,
}

impl<'a> Contact<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Versioned alias of this namespace
    pub fn v3(&self) -> Contact<'a> {
        *self
    }

    /// Users
    pub fn user(&self) -> User<'a> {
        User {
            client: self.client,
        }
    }

    /// Departments
    pub fn department(&self) -> Department<'a> {
        Department {
            client: self.client,
        }
    }
}

/// Users
#[derive(Debug, Clone, Copy)]
pub struct User<'a> {
    client: &'a Client,
}

impl User<'_> {
    /// Get one user
    pub async fn get(&self, user_id: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.client
            .request(Method::GET, USER, options.path_param("user_id", user_id))
            .await
    }

    /// Users directly under a department (one page)
    pub async fn find_by_department(
        &self,
        department_id: &str,
        request: PageRequest,
    ) -> Result<ApiResponse> {
        self.client
            .request(
                Method::GET,
                USERS_BY_DEPARTMENT,
                request.query("department_id", department_id),
            )
            .await
    }

    /// Users directly under a department across all pages
    pub fn find_by_department_with_iterator(
        &self,
        department_id: &str,
        request: PageRequest,
    ) -> PageStream {
        self.client
            .paginate(
                Method::GET,
                USERS_BY_DEPARTMENT,
                request.query("department_id", department_id),
            )
            .pages()
    }
}

/// Departments
#[derive(Debug, Clone, Copy)]
pub struct Department<'a> {
    client: &'a Client,
}

impl Department<'_> {
    /// Child departments (one page); `0` is the root department
    pub async fn children(&self, department_id: &str, request: PageRequest) -> Result<ApiResponse> {
        self.client
            .request(
                Method::GET,
                DEPARTMENT_CHILDREN,
                request.path_param("department_id", department_id),
            )
            .await
    }

    /// Child departments across all pages
    pub fn children_with_iterator(&self, department_id: &str, request: PageRequest) -> PageStream {
        self.client
            .paginate(
                Method::GET,
                DEPARTMENT_CHILDREN,
                request.path_param("department_id", department_id),
            )
            .pages()
    }
}
