// Post list view: one request on first frame, then a grid of cards.

use eframe::egui;
use std::sync::mpsc;

use crate::api::{ApiError, ApiService};
use crate::localization::{translate, translate_with};
use crate::types::Post;
use crate::ui_constants::{spacing, CARD_GAP, CARD_WIDTH};
use crate::views::cards::post_card;

use super::rt;

type FetchResult = Result<Vec<Post>, ApiError>;

pub struct PostsView {
    api: ApiService,
    endpoint: String,
    posts: Vec<Post>,
    // Set once the single request has been issued
    initialized: bool,
    loading: bool,
    tx: mpsc::Sender<FetchResult>,
    rx: mpsc::Receiver<FetchResult>,
}

impl PostsView {
    pub fn new(api: ApiService, endpoint: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            api,
            endpoint: endpoint.into(),
            posts: Vec::new(),
            initialized: false,
            loading: false,
            tx,
            rx,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Lifecycle hook: issues the view's only request. Later calls do nothing.
    pub fn on_init(&mut self, ctx: &egui::Context) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.loading = true;

        let api = self.api.clone();
        let url = self.endpoint.clone();
        let tx = self.tx.clone();
        let ctx2 = ctx.clone();
        log::info!("Requesting posts from {}", url);
        rt().spawn(async move {
            let res = api.fetch_posts(&url).await;
            let _ = tx.send(res);
            ctx2.request_repaint();
        });
    }

    /// Drain finished requests. A success replaces the collection; a failure is only logged.
    pub fn poll_incoming(&mut self) {
        while let Ok(res) = self.rx.try_recv() {
            self.loading = false;
            match res {
                Ok(posts) => self.posts = posts,
                Err(err) => log::error!("Error getting posts from {}: {err}", self.endpoint),
            }
        }
    }

    /// Draw the view. Returns how many cards were drawn this frame.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> usize {
        let ctx = ui.ctx().clone();
        self.on_init(&ctx);
        self.poll_incoming();

        if self.loading {
            ui.add_space(spacing::XLARGE);
            ui.vertical_centered(|ui| {
                ui.add(egui::Spinner::new());
                ui.label(translate("loading"));
            });
            return 0;
        }

        let mut drawn = 0;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if !self.posts.is_empty() {
                    ui.label(
                        egui::RichText::new(translate_with(
                            "posts-count",
                            &[("count", self.posts.len().to_string())],
                        ))
                        .small(),
                    );
                    ui.add_space(spacing::MEDIUM);
                }
                drawn = draw_posts_grid(ui, &self.posts, CARD_WIDTH, CARD_GAP);
            });
        drawn
    }
}

/// Number of card columns that fit into `avail_w`, at least one.
fn column_count(avail_w: f32, card_w: f32, gap: f32) -> usize {
    (((avail_w + gap) / (card_w + gap)).floor() as usize).max(1)
}

fn draw_posts_grid(ui: &mut egui::Ui, posts: &[Post], card_w: f32, gap: f32) -> usize {
    let avail_w = ui.available_width().floor();
    let cols = column_count(avail_w, card_w, gap);
    let row_w = (cols as f32) * card_w + ((cols - 1) as f32) * gap;
    let left_pad = ((avail_w - row_w) / 2.0).max(0.0);

    let mut drawn = 0;
    for row in posts.chunks(cols) {
        ui.horizontal_top(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            ui.add_space(left_pad);
            for (c, post) in row.iter().enumerate() {
                if c > 0 {
                    ui.add_space(gap);
                }
                ui.push_id(post.id, |ui| {
                    ui.vertical(|ui| {
                        ui.set_width(card_w);
                        post_card(ui, post, card_w);
                    });
                });
                drawn += 1;
            }
        });
        ui.add_space(gap);
    }
    drawn
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use eframe::egui;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{column_count, PostsView};
    use crate::api::ApiService;
    use crate::types::Post;

    fn sample_posts(n: u64) -> Vec<Post> {
        (1..=n)
            .map(|i| Post {
                id: i,
                user_id: 1 + i / 2,
                title: format!("title number {i}"),
                body: format!("body text of post {i}"),
            })
            .collect()
    }

    fn collect_texts(shape: &egui::Shape, out: &mut Vec<String>) {
        match shape {
            egui::Shape::Text(t) => out.push(t.galley.text().to_string()),
            egui::Shape::Vec(shapes) => shapes.iter().for_each(|s| collect_texts(s, out)),
            _ => {}
        }
    }

    /// Run one headless frame; returns the card count and every painted string.
    fn render(view: &mut PostsView, ctx: &egui::Context) -> (usize, Vec<String>) {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(1280.0, 4000.0),
            )),
            ..Default::default()
        };
        let mut drawn = 0;
        let output = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                drawn = view.ui(ui);
            });
        });
        let mut texts = Vec::new();
        for clipped in &output.shapes {
            collect_texts(&clipped.shape, &mut texts);
        }
        (drawn, texts)
    }

    async fn wait_until_loaded(view: &mut PostsView) {
        for _ in 0..500 {
            view.poll_incoming();
            if !view.is_loading() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("posts request did not finish");
    }

    #[tokio::test]
    async fn renders_one_card_per_post() {
        // 1264px usable width fits 3 columns: 7 posts span 3 rows, 25 span 9.
        for n in [0u64, 1, 7, 25] {
            let posts = sample_posts(n);
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/posts"))
                .respond_with(ResponseTemplate::new(200).set_body_json(&posts))
                .expect(1)
                .mount(&server)
                .await;

            let ctx = egui::Context::default();
            let mut view = PostsView::new(ApiService::new(), format!("{}/posts", server.uri()));
            render(&mut view, &ctx);
            assert!(view.initialized);
            wait_until_loaded(&mut view).await;

            let (drawn, texts) = render(&mut view, &ctx);
            assert_eq!(drawn, posts.len(), "card count for {n} posts");
            assert_eq!(view.posts(), posts.as_slice());
            for p in &posts {
                assert!(texts.contains(&p.title), "missing title {:?} in {texts:?}", p.title);
                assert!(texts.contains(&p.body), "missing body {:?} in {texts:?}", p.body);
            }
            if n == 0 {
                assert!(
                    !texts.iter().any(|t| t.ends_with(" posts")),
                    "empty list shows a count: {texts:?}"
                );
            }

            // More frames never issue a second request; `expect(1)` is checked here.
            render(&mut view, &ctx);
            server.verify().await;
        }
    }

    #[tokio::test]
    async fn failed_request_leaves_list_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = egui::Context::default();
        let mut view = PostsView::new(ApiService::new(), format!("{}/posts", server.uri()));
        render(&mut view, &ctx);
        wait_until_loaded(&mut view).await;

        let (drawn, _) = render(&mut view, &ctx);
        assert_eq!(drawn, 0);
        assert!(view.posts().is_empty());
    }

    #[test]
    fn column_count_never_zero() {
        assert_eq!(column_count(100.0, 320.0, 16.0), 1);
        assert_eq!(column_count(320.0, 320.0, 16.0), 1);
        assert_eq!(column_count(656.0, 320.0, 16.0), 2);
        assert_eq!(column_count(1280.0, 320.0, 16.0), 3);
    }
}
