//! Use case and router tests against an in-memory store

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use auth::models::user_role::UserRole;
use auth::{CurrentPrincipal, Principal, admin_only, require_admin};
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::{Extension, Router};
use kernel::id::{PostId, UserId};
use tower::ServiceExt;

use crate::application::{
    AddCommentInput, AddCommentUseCase, CreatePostUseCase, DeletePostUseCase, EditPostUseCase,
    ListPostsUseCase, PostInput, ShowPostUseCase,
};
use crate::domain::entity::{
    blog_post::{BlogPost, PostWithAuthor},
    comment::{Comment, CommentWithAuthor},
};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::{BlogAppState, BlogError, BlogResult, blog_router};

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Default)]
struct MemoryStore {
    authors: Mutex<HashMap<UserId, String>>,
    posts: Mutex<Vec<BlogPost>>,
    comments: Mutex<Vec<Comment>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    fn add_author(&self, name: &str, role: UserRole) -> Principal {
        let principal = Principal::new(UserId::new(), role);
        self.authors
            .lock()
            .unwrap()
            .insert(principal.user_id, name.to_string());
        principal
    }

    fn author_name(&self, user_id: &UserId) -> String {
        self.authors
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn comment_count(&self) -> usize {
        self.comments.lock().unwrap().len()
    }

    /// Insert a post without going through the repository (not counted as a write)
    fn seed_post(&self, author: &Principal, title: &str) -> BlogPost {
        let post = BlogPost::new(input(title).into_draft().unwrap(), author.user_id);
        self.posts.lock().unwrap().push(post.clone());
        post
    }

    fn stored_post(&self, post_id: &PostId) -> Option<BlogPost> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.post_id == post_id)
            .cloned()
    }
}

fn assert_unchanged(store: &MemoryStore, original: &BlogPost) {
    let stored = store.stored_post(&original.post_id).expect("post still stored");
    assert_eq!(stored.title, original.title);
    assert_eq!(stored.subtitle, original.subtitle);
    assert_eq!(stored.body, original.body);
    assert_eq!(stored.author_id, original.author_id);
}

impl PostRepository for MemoryStore {
    async fn list(&self) -> BlogResult<Vec<PostWithAuthor>> {
        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(posts
            .into_iter()
            .map(|post| PostWithAuthor {
                author_name: self.author_name(&post.author_id),
                post,
            })
            .collect())
    }

    async fn find_by_id(&self, post_id: &PostId) -> BlogResult<Option<PostWithAuthor>> {
        let post = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.post_id == post_id)
            .cloned();

        Ok(post.map(|post| PostWithAuthor {
            author_name: self.author_name(&post.author_id),
            post,
        }))
    }

    async fn create(&self, post: &BlogPost) -> BlogResult<()> {
        let mut posts = self.posts.lock().unwrap();
        if posts.iter().any(|p| p.title == post.title) {
            return Err(BlogError::TitleTaken);
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        posts.push(post.clone());
        Ok(())
    }

    async fn update(&self, post: &BlogPost) -> BlogResult<bool> {
        let mut posts = self.posts.lock().unwrap();
        if posts
            .iter()
            .any(|p| p.title == post.title && p.post_id != post.post_id)
        {
            return Err(BlogError::TitleTaken);
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        match posts.iter_mut().find(|p| p.post_id == post.post_id) {
            Some(stored) => {
                *stored = post.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, post_id: &PostId) -> BlogResult<bool> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| &p.post_id != post_id);
        self.comments
            .lock()
            .unwrap()
            .retain(|c| &c.post_id != post_id);
        Ok(posts.len() < before)
    }
}

impl CommentRepository for MemoryStore {
    async fn list_for_post(&self, post_id: &PostId) -> BlogResult<Vec<CommentWithAuthor>> {
        let comments = self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| &c.post_id == post_id)
            .cloned()
            .collect::<Vec<_>>();

        Ok(comments
            .into_iter()
            .map(|comment| CommentWithAuthor {
                author_name: self.author_name(&comment.author_id),
                comment,
            })
            .collect())
    }

    async fn create(&self, comment: &Comment) -> BlogResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.comments.lock().unwrap().push(comment.clone());
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn input(title: &str) -> PostInput {
    PostInput {
        title: title.to_string(),
        subtitle: "Who knew that cacti lived such interesting lives.".to_string(),
        img_url: "https://images.example.com/cactus.jpg".to_string(),
        body: "<p>Nori grape silver beet broccoli kombu beet greens fava bean.</p>".to_string(),
    }
}

async fn create(store: &Arc<MemoryStore>, admin: &Principal, title: &str) -> BlogPost {
    let proof = require_admin(Some(admin)).unwrap();
    CreatePostUseCase::new(store.clone())
        .execute(&proof, input(title))
        .await
        .unwrap()
}

// ============================================================================
// Posts
// ============================================================================

#[tokio::test]
async fn test_admin_creates_and_lists_posts() {
    let store = Arc::new(MemoryStore::default());
    let admin = store.add_author("Angela", UserRole::Admin);

    let post = create(&store, &admin, "The Life of Cactus").await;
    assert_eq!(post.author_id, admin.user_id);

    let posts = ListPostsUseCase::new(store.clone()).execute().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].author_name, "Angela");
    assert_eq!(posts[0].post.title.as_str(), "The Life of Cactus");
}

#[tokio::test]
async fn test_title_must_be_unique() {
    let store = Arc::new(MemoryStore::default());
    let admin = store.add_author("Angela", UserRole::Admin);
    create(&store, &admin, "The Life of Cactus").await;

    let proof = require_admin(Some(&admin)).unwrap();
    let result = CreatePostUseCase::new(store.clone())
        .execute(&proof, input("The Life of Cactus"))
        .await;

    assert!(matches!(result, Err(BlogError::TitleTaken)));
}

#[tokio::test]
async fn test_reader_cannot_create_and_nothing_is_written() {
    let store = Arc::new(MemoryStore::default());
    let reader = store.add_author("Bob", UserRole::Reader);
    let use_case = CreatePostUseCase::new(store.clone());

    let result: BlogResult<BlogPost> = admin_only(Some(&reader), |admin| async move {
        use_case.execute(&admin, input("Sneaky")).await
    })
    .await;

    assert!(matches!(result, Err(BlogError::Forbidden)));
    assert_eq!(store.writes(), 0);

    let anonymous: BlogResult<()> = admin_only(None, |admin| {
        let use_case = DeletePostUseCase::new(store.clone());
        async move { use_case.execute(&admin, &PostId::new()).await }
    })
    .await;

    assert!(matches!(anonymous, Err(BlogError::Forbidden)));
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn test_reader_cannot_edit_and_post_is_unchanged() {
    let store = Arc::new(MemoryStore::default());
    let admin = store.add_author("Angela", UserRole::Admin);
    let reader = store.add_author("Bob", UserRole::Reader);
    let post = store.seed_post(&admin, "Original");

    let use_case = EditPostUseCase::new(store.clone());
    let post_id = post.post_id;
    let result: BlogResult<BlogPost> = admin_only(Some(&reader), |admin| async move {
        use_case.execute(&admin, &post_id, input("Hijacked")).await
    })
    .await;

    assert!(matches!(result, Err(BlogError::Forbidden)));
    assert_eq!(store.writes(), 0);
    assert_unchanged(&store, &post);
}

#[tokio::test]
async fn test_reader_cannot_delete_and_post_is_unchanged() {
    let store = Arc::new(MemoryStore::default());
    let admin = store.add_author("Angela", UserRole::Admin);
    let reader = store.add_author("Bob", UserRole::Reader);
    let post = store.seed_post(&admin, "Keep me");

    let use_case = DeletePostUseCase::new(store.clone());
    let post_id = post.post_id;
    let result: BlogResult<()> = admin_only(Some(&reader), |admin| async move {
        use_case.execute(&admin, &post_id).await
    })
    .await;

    assert!(matches!(result, Err(BlogError::Forbidden)));
    assert_eq!(store.writes(), 0);
    assert_unchanged(&store, &post);
}

#[tokio::test]
async fn test_edit_post_keeps_publication_date() {
    let store = Arc::new(MemoryStore::default());
    let admin = store.add_author("Angela", UserRole::Admin);
    let post = create(&store, &admin, "Before").await;

    let proof = require_admin(Some(&admin)).unwrap();
    let edited = EditPostUseCase::new(store.clone())
        .execute(&proof, &post.post_id, input("<script>x</script>After"))
        .await
        .unwrap();

    assert_eq!(edited.post_id, post.post_id);
    assert_eq!(edited.published_on, post.published_on);
    assert_eq!(edited.title.as_str(), "After");

    let missing = EditPostUseCase::new(store.clone())
        .execute(&proof, &PostId::new(), input("Other"))
        .await;
    assert!(matches!(missing, Err(BlogError::PostNotFound)));
}

#[tokio::test]
async fn test_invalid_draft_is_rejected_before_storage() {
    let store = Arc::new(MemoryStore::default());
    let admin = store.add_author("Angela", UserRole::Admin);
    let proof = require_admin(Some(&admin)).unwrap();

    let mut bad = input("Title");
    bad.img_url = "javascript:alert(1)".to_string();

    let result = CreatePostUseCase::new(store.clone())
        .execute(&proof, bad)
        .await;

    assert!(matches!(result, Err(BlogError::Validation(_))));
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn test_delete_post_removes_comments() {
    let store = Arc::new(MemoryStore::default());
    let admin = store.add_author("Angela", UserRole::Admin);
    let reader = store.add_author("Bob", UserRole::Reader);
    let post = create(&store, &admin, "Doomed").await;

    AddCommentUseCase::new(store.clone(), store.clone())
        .execute(
            Some(&reader),
            AddCommentInput {
                post_id: post.post_id,
                text: "First!".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(store.comment_count(), 1);

    let proof = require_admin(Some(&admin)).unwrap();
    DeletePostUseCase::new(store.clone())
        .execute(&proof, &post.post_id)
        .await
        .unwrap();

    assert_eq!(store.comment_count(), 0);
    let again = DeletePostUseCase::new(store.clone())
        .execute(&proof, &post.post_id)
        .await;
    assert!(matches!(again, Err(BlogError::PostNotFound)));
}

// ============================================================================
// Comments
// ============================================================================

#[tokio::test]
async fn test_comments_require_login_and_are_sanitized() {
    let store = Arc::new(MemoryStore::default());
    let admin = store.add_author("Angela", UserRole::Admin);
    let reader = store.add_author("Bob", UserRole::Reader);
    let post = create(&store, &admin, "Commented").await;
    let use_case = AddCommentUseCase::new(store.clone(), store.clone());

    let anonymous = use_case
        .execute(
            None,
            AddCommentInput {
                post_id: post.post_id,
                text: "hello".to_string(),
            },
        )
        .await;
    assert!(matches!(anonymous, Err(BlogError::LoginRequired)));

    use_case
        .execute(
            Some(&reader),
            AddCommentInput {
                post_id: post.post_id,
                text: "<img src=\"http://evil.com/a.png\" onerror=\"x\">Nice".to_string(),
            },
        )
        .await
        .unwrap();

    let shown = ShowPostUseCase::new(store.clone(), store.clone())
        .execute(&post.post_id)
        .await
        .unwrap();
    assert_eq!(shown.comments.len(), 1);
    assert_eq!(shown.comments[0].author_name, "Bob");
    let text = shown.comments[0].comment.text.as_str();
    assert!(!text.contains("evil.com"));
    assert!(!text.contains("onerror"));
    assert!(text.contains("Nice"));
}

#[tokio::test]
async fn test_comment_on_missing_post() {
    let store = Arc::new(MemoryStore::default());
    let reader = store.add_author("Bob", UserRole::Reader);

    let result = AddCommentUseCase::new(store.clone(), store.clone())
        .execute(
            Some(&reader),
            AddCommentInput {
                post_id: PostId::new(),
                text: "hello".to_string(),
            },
        )
        .await;

    assert!(matches!(result, Err(BlogError::PostNotFound)));
    assert_eq!(store.writes(), 0);
}

// ============================================================================
// Router
// ============================================================================

fn router_as(store: MemoryStore, principal: Option<Principal>) -> Router {
    shared_router_as(Arc::new(store), principal)
}

/// Router over a store the test keeps a handle to
fn shared_router_as(store: Arc<MemoryStore>, principal: Option<Principal>) -> Router {
    blog_router(BlogAppState { repo: store }).layer(Extension(CurrentPrincipal(principal)))
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    json_request("POST", uri, body)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_body() -> serde_json::Value {
    serde_json::json!({
        "title": "The Life of Cactus",
        "subtitle": "Who knew",
        "imgUrl": "https://images.example.com/cactus.jpg",
        "body": "<p>Body</p>",
    })
}

#[tokio::test]
async fn test_router_admin_flow() {
    let store = MemoryStore::default();
    let admin = store.add_author("Angela", UserRole::Admin);
    let app = router_as(store, Some(admin));

    let response = app
        .clone()
        .oneshot(post_json("/posts", post_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["author"], "Angela");
    assert_eq!(created["comments"], serde_json::json!([]));

    let post_id = created["postId"].as_str().unwrap().to_string();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/posts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let posts = body_json(response).await;
    assert_eq!(posts[0]["postId"], post_id.as_str());
    assert_eq!(posts[0]["date"], created["date"]);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/posts/{post_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_router_refuses_non_admin() {
    let store = MemoryStore::default();
    let reader = store.add_author("Bob", UserRole::Reader);

    let response = router_as(store, Some(reader))
        .oneshot(post_json("/posts", post_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = router_as(MemoryStore::default(), None)
        .oneshot(post_json("/posts", post_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_router_refuses_reader_edit_and_delete() {
    let store = Arc::new(MemoryStore::default());
    let admin = store.add_author("Angela", UserRole::Admin);
    let reader = store.add_author("Bob", UserRole::Reader);
    let post = store.seed_post(&admin, "Original");
    let app = shared_router_as(store.clone(), Some(reader));
    let uri = format!("/posts/{}", post.post_id);

    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, post_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(&uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    assert_eq!(store.writes(), 0);
    assert_unchanged(&store, &post);
}

#[tokio::test]
async fn test_router_unknown_post() {
    let app = router_as(MemoryStore::default(), None);

    for uri in ["/posts/not-a-uuid".to_string(), format!("/posts/{}", PostId::new())] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_router_anonymous_comment() {
    let response = router_as(MemoryStore::default(), None)
        .oneshot(post_json(
            &format!("/posts/{}/comments", PostId::new()),
            serde_json::json!({ "text": "hello" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
