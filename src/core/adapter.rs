use crate::config::DisplayConfig;
use crate::core::resolver::LinkResolver;
use crate::domain::entry::{Entry, EntryCollection, EntryQuery};
use crate::domain::model::{
    Article, ArticleProfile, DropshippingSite, HomePageContent, NavigationLink, Profile,
    ShapedNavigationLinks, SocialLink,
};
use crate::domain::ports::ContentStore;
use crate::utils::date::format_optional_date;
use crate::utils::error::{ContentError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

pub const PROFILE_TYPE: &str = "keycaps-profile";
pub const HOMEPAGE_TYPE: &str = "homepage";
pub const SOCIAL_NETWORK_TYPE: &str = "socialNetwork";
pub const ARTICLE_TYPE: &str = "article";
pub const DROPSHIPPING_TYPE: &str = "dropshippingWebsite";
pub const OG_IMAGE_TYPE: &str = "apiOgImages";

const ARTICLE_LIMIT: u32 = 300;
const DROPSHIPPING_LIMIT: u32 = 300;
const OG_IMAGE_LIMIT: u32 = 20;

/// Reads catalog content and flattens it into view models.
///
/// Holds no state besides the store and display settings; every method is a
/// single independent query.
pub struct ContentAdapter<S: ContentStore> {
    store: S,
    display: DisplayConfig,
}

impl<S: ContentStore> ContentAdapter<S> {
    pub fn new(store: S) -> Self {
        Self::with_display(store, DisplayConfig::default())
    }

    pub fn with_display(store: S, display: DisplayConfig) -> Self {
        Self { store, display }
    }

    async fn fetch(&self, query: EntryQuery) -> Result<EntryCollection> {
        tracing::debug!("Querying '{}' entries: {:?}", query.content_type, query);
        let collection = self.store.get_entries(&query).await?;
        tracing::debug!(
            "Received {} '{}' entries ({} total)",
            collection.items.len(),
            query.content_type,
            collection.total
        );
        Ok(collection)
    }

    async fn fetch_profiles(&self) -> Result<EntryCollection> {
        self.fetch(EntryQuery::new(PROFILE_TYPE).order("fields.title"))
            .await
    }

    /// Profiles grouped by shape for the navigation bar.
    ///
    /// An unreachable store yields an empty mapping so pages still render.
    pub async fn get_navigation_links(&self) -> Result<ShapedNavigationLinks> {
        let collection = match self.fetch_profiles().await {
            Ok(collection) => collection,
            Err(e) if e.is_transport() => {
                tracing::warn!("Navigation links unavailable, continuing without them: {}", e);
                return Ok(ShapedNavigationLinks::new());
            }
            Err(e) => return Err(e),
        };

        let mut shaped = ShapedNavigationLinks::new();
        for entry in &collection.items {
            let link = navigation_link(entry)?;
            shaped.entry(link.shape.clone()).or_default().push(link);
        }

        Ok(shaped)
    }

    pub async fn get_profile_slugs(&self) -> Result<Vec<String>> {
        let collection = self.fetch_profiles().await?;
        collection.items.iter().map(|e| e.text("slug")).collect()
    }

    pub async fn get_profile_titles(&self) -> Result<Vec<String>> {
        let collection = self.fetch_profiles().await?;
        collection.items.iter().map(|e| e.text("title")).collect()
    }

    pub async fn get_home_page_information(&self) -> Result<HomePageContent> {
        // cards link to profiles, which link to thumbnails
        let collection = self
            .fetch(EntryQuery::new(HOMEPAGE_TYPE).limit(1).include(2))
            .await?;
        let resolver = LinkResolver::new(&collection);

        let home = collection
            .items
            .first()
            .ok_or_else(|| ContentError::MissingSingleton {
                content_type: HOMEPAGE_TYPE.to_string(),
            })?;

        let profile_cards = resolver
            .entries(home, "profileCards")?
            .into_iter()
            .map(|card| profile(card, &resolver))
            .collect::<Result<Vec<_>>>()?;

        Ok(HomePageContent {
            title: home.text("title")?,
            description: home.text("description")?,
            profile_cards,
        })
    }

    pub async fn get_social_links_entries(&self) -> Result<Vec<SocialLink>> {
        let collection = self.fetch(EntryQuery::new(SOCIAL_NETWORK_TYPE)).await?;

        collection
            .items
            .iter()
            .map(|entry| {
                Ok(SocialLink {
                    title: entry.text("title")?,
                    url: entry.text("url")?,
                    icon_text: entry.text("iconText")?,
                })
            })
            .collect()
    }

    /// Catalog articles, optionally restricted to one profile slug.
    pub async fn get_articles(&self, profile_slug: Option<&str>) -> Result<Vec<Article>> {
        let collection = self
            .fetch(EntryQuery::new(ARTICLE_TYPE).limit(ARTICLE_LIMIT).include(1))
            .await?;
        let resolver = LinkResolver::new(&collection);

        let mut articles = Vec::new();
        for entry in &collection.items {
            let profile_entry = resolver.entry(entry, "profile")?;
            if let Some(wanted) = profile_slug {
                if profile_entry.text("slug")? != wanted {
                    continue;
                }
            }
            articles.push(self.article(entry, profile_entry, &resolver)?);
        }

        if let Some(wanted) = profile_slug {
            tracing::debug!("{} articles match profile '{}'", articles.len(), wanted);
        }

        Ok(articles)
    }

    fn article(
        &self,
        entry: &Entry,
        profile_entry: &Entry,
        resolver: &LinkResolver<'_>,
    ) -> Result<Article> {
        let format = self.display.date_format.as_str();

        Ok(Article {
            title: entry.text("title")?,
            img: resolver.asset_url(entry, "img")?,
            slug: entry.text("slug")?,
            profile: ArticleProfile {
                title: profile_entry.text("title")?,
                slug: profile_entry.text("slug")?,
                description: profile_entry.opt_text("description"),
                abbreviation: profile_entry.opt_text("abbreviation"),
            },
            material: entry.text("material")?.into(),
            description: entry.opt_text("description"),
            status: entry.text("status")?.into(),
            start_date: format_optional_date(entry.opt_text("startDate").as_deref(), format)?,
            end_date: format_optional_date(entry.opt_text("endDate").as_deref(), format)?,
            url: entry.text("url")?,
            additional_url: entry.opt_text("additionalUrl"),
            warning_text: entry.opt_text("warningText"),
            is_new: entry.opt_bool("isNew"),
        })
    }

    pub async fn get_dropshipping_sites(&self) -> Result<Vec<DropshippingSite>> {
        let collection = self
            .fetch(
                EntryQuery::new(DROPSHIPPING_TYPE)
                    .limit(DROPSHIPPING_LIMIT)
                    .include(1),
            )
            .await?;
        let resolver = LinkResolver::new(&collection);

        collection
            .items
            .iter()
            .map(|entry| {
                Ok(DropshippingSite {
                    title: entry.text("title")?,
                    img: resolver.asset_url(entry, "banner")?,
                    url: entry.text("url")?,
                    examples: entry.opt_text_list("examples"),
                    categories: entry.opt_text_list("categories"),
                    description: entry.opt_text("description"),
                })
            })
            .collect()
    }

    /// URL of one Open Graph fallback image, picked uniformly at random.
    pub async fn get_random_og_api_img(&self) -> Result<String> {
        let urls = self.og_image_urls().await?;
        let mut rng = rand::thread_rng();
        pick_og_image(&urls, &mut rng)
    }

    pub async fn get_random_og_api_img_with<R: Rng + Send>(&self, rng: &mut R) -> Result<String> {
        let urls = self.og_image_urls().await?;
        pick_og_image(&urls, rng)
    }

    async fn og_image_urls(&self) -> Result<Vec<String>> {
        let collection = self
            .fetch(EntryQuery::new(OG_IMAGE_TYPE).limit(OG_IMAGE_LIMIT).include(1))
            .await?;
        let resolver = LinkResolver::new(&collection);

        collection
            .items
            .iter()
            .map(|entry| resolver.asset_url(entry, "img"))
            .collect()
    }
}

fn pick_og_image<R: Rng + ?Sized>(urls: &[String], rng: &mut R) -> Result<String> {
    urls.choose(rng)
        .cloned()
        .ok_or_else(|| ContentError::EmptyCollection {
            content_type: OG_IMAGE_TYPE.to_string(),
        })
}

fn navigation_link(entry: &Entry) -> Result<NavigationLink> {
    Ok(NavigationLink {
        title: entry.text("title")?,
        slug: entry.text("slug")?,
        abbreviation: entry.text("abbreviation")?,
        shape: entry.text("shape")?.into(),
        description: entry.opt_text("description"),
        navbar_description: entry.text("navbarDescription")?,
        navbar_icon_name: entry.opt_text("navbarIconName"),
    })
}

fn profile(entry: &Entry, resolver: &LinkResolver<'_>) -> Result<Profile> {
    Ok(Profile {
        title: entry.text("title")?,
        slug: entry.text("slug")?,
        abbreviation: entry.text("abbreviation")?,
        description: entry.opt_text("description"),
        thumbnail: resolver.optional_asset_url(entry, "thumbnail")?,
        navbar_description: entry.text("navbarDescription")?,
        navbar_icon_name: entry.opt_text("navbarIconName"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Material, Shape, Status};
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::{json, Value};
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct FixtureStore {
        collections: HashMap<String, EntryCollection>,
        unreachable: bool,
        queries: Arc<Mutex<Vec<EntryQuery>>>,
    }

    impl FixtureStore {
        fn with(mut self, content_type: &str, collection: Value) -> Self {
            self.collections.insert(
                content_type.to_string(),
                serde_json::from_value(collection).unwrap(),
            );
            self
        }

        fn unreachable() -> Self {
            Self {
                unreachable: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl ContentStore for FixtureStore {
        async fn get_entries(&self, query: &EntryQuery) -> Result<EntryCollection> {
            self.queries.lock().await.push(query.clone());
            if self.unreachable {
                return Err(ContentError::ApiError {
                    status: 503,
                    message: "Service unavailable".to_string(),
                });
            }
            Ok(self
                .collections
                .get(&query.content_type)
                .cloned()
                .unwrap_or_default())
        }
    }

    fn link(link_type: &str, id: &str) -> Value {
        json!({"sys": {"type": "Link", "linkType": link_type, "id": id}})
    }

    fn asset(id: &str, url: &str) -> Value {
        json!({"sys": {"id": id, "type": "Asset"}, "fields": {"file": {"url": url}}})
    }

    fn profile_entry(id: &str, title: &str, shape: &str) -> Value {
        json!({
            "sys": {"id": id, "type": "Entry"},
            "fields": {
                "title": title,
                "slug": title.to_lowercase(),
                "abbreviation": &title[..2],
                "shape": shape,
                "navbarDescription": format!("{} profile", title),
                "thumbnail": link("Asset", &format!("{}-thumb", id))
            }
        })
    }

    fn profiles() -> Value {
        json!({
            "total": 4,
            "items": [
                profile_entry("p-cherry", "Cherry", "Uniforme"),
                profile_entry("p-dsa", "DSA", "Uniforme"),
                profile_entry("p-mt3", "MT3", "Sculpté"),
                profile_entry("p-sa", "SA", "Sculpté")
            ]
        })
    }

    fn article_entry(id: &str, title: &str, profile_id: &str, start: Option<&str>) -> Value {
        let mut fields = json!({
            "title": title,
            "slug": title.to_lowercase().replace(' ', "-"),
            "img": link("Asset", &format!("{}-img", id)),
            "profile": link("Entry", profile_id),
            "material": "PBT Dye-Sub",
            "status": "GB en cours",
            "url": format!("https://shop.example.com/{}", id)
        });
        if let Some(start) = start {
            fields["startDate"] = json!(start);
        }
        json!({"sys": {"id": id, "type": "Entry"}, "fields": fields})
    }

    fn articles() -> Value {
        json!({
            "total": 3,
            "items": [
                article_entry("a1", "GMK Olivia", "p-cherry", Some("2024-03-01")),
                article_entry("a2", "SA Bliss", "p-sa", None),
                article_entry("a3", "GMK Laser", "p-cherry", Some("2023-11-20T00:00+01:00"))
            ],
            "includes": {
                "Entry": [
                    profile_entry("p-cherry", "Cherry", "Uniforme"),
                    profile_entry("p-sa", "SA", "Sculpté")
                ],
                "Asset": [
                    asset("a1-img", "//images.ctfassets.net/space/a1/olivia.png"),
                    asset("a2-img", "//images.ctfassets.net/space/a2/bliss.png"),
                    asset("a3-img", "//images.ctfassets.net/space/a3/laser.png")
                ]
            }
        })
    }

    #[tokio::test]
    async fn test_navigation_links_group_by_shape() {
        let store = FixtureStore::default().with(PROFILE_TYPE, profiles());
        let adapter = ContentAdapter::new(store.clone());

        let shaped = adapter.get_navigation_links().await.unwrap();
        let slugs = adapter.get_profile_slugs().await.unwrap();
        let titles = adapter.get_profile_titles().await.unwrap();

        assert_eq!(shaped.len(), 2);
        for (shape, links) in &shaped {
            assert!(links.iter().all(|l| &l.shape == shape));
        }
        let uniform: Vec<&str> = shaped[&Shape::Uniform].iter().map(|l| l.title.as_str()).collect();
        assert_eq!(uniform, vec!["Cherry", "DSA"]);

        assert_eq!(shaped.values().map(Vec::len).sum::<usize>(), slugs.len());
        let mut grouped_slugs: Vec<String> = shaped
            .values()
            .flatten()
            .map(|l| l.slug.clone())
            .collect();
        grouped_slugs.sort();
        let mut sorted_slugs = slugs.clone();
        sorted_slugs.sort();
        assert_eq!(grouped_slugs, sorted_slugs);
        assert_eq!(titles, vec!["Cherry", "DSA", "MT3", "SA"]);

        let queries = store.queries.lock().await;
        assert!(queries
            .iter()
            .all(|q| q.order.as_deref() == Some("fields.title")));
    }

    #[tokio::test]
    async fn test_navigation_links_empty_when_store_unreachable() {
        let adapter = ContentAdapter::new(FixtureStore::unreachable());

        let shaped = adapter.get_navigation_links().await.unwrap();
        assert!(shaped.is_empty());

        // the other profile projections surface the failure
        assert!(adapter.get_profile_slugs().await.is_err());
    }

    #[tokio::test]
    async fn test_articles_filter_by_profile() {
        let store = FixtureStore::default().with(ARTICLE_TYPE, articles());
        let adapter = ContentAdapter::new(store.clone());

        let all = adapter.get_articles(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let cherry = adapter.get_articles(Some("cherry")).await.unwrap();
        assert_eq!(cherry.len(), 2);
        assert!(cherry.iter().all(|a| a.profile.slug == "cherry"));

        let none = adapter.get_articles(Some("kat")).await.unwrap();
        assert!(none.is_empty());

        let queries = store.queries.lock().await;
        assert_eq!(queries[0].limit, Some(300));
    }

    #[tokio::test]
    async fn test_articles_are_flattened() {
        let adapter =
            ContentAdapter::new(FixtureStore::default().with(ARTICLE_TYPE, articles()));

        let articles = adapter.get_articles(None).await.unwrap();
        let olivia = &articles[0];

        assert_eq!(olivia.img, "//images.ctfassets.net/space/a1/olivia.png");
        assert_eq!(olivia.profile.title, "Cherry");
        assert_eq!(olivia.profile.abbreviation.as_deref(), Some("Ch"));
        assert_eq!(olivia.material, Material::PbtDyeSub);
        assert_eq!(olivia.status, Status::GroupBuyOpen);
        assert_eq!(olivia.start_date.as_deref(), Some("01/03/2024"));
        assert_eq!(articles[1].start_date, None);
        assert_eq!(articles[2].start_date.as_deref(), Some("20/11/2023"));

        let value = serde_json::to_value(olivia).unwrap();
        assert!(value["profile"].get("sys").is_none());
        assert_eq!(value["profile"]["slug"], "cherry");
    }

    #[tokio::test]
    async fn test_article_with_missing_profile_fails_fast() {
        let store = FixtureStore::default().with(
            ARTICLE_TYPE,
            json!({"items": [article_entry("a1", "GMK Olivia", "p-gone", None)]}),
        );
        let adapter = ContentAdapter::new(store);

        assert!(matches!(
            adapter.get_articles(None).await,
            Err(ContentError::UnresolvedReference { .. })
        ));
    }

    #[tokio::test]
    async fn test_home_page_resolves_profile_cards() {
        let store = FixtureStore::default().with(
            HOMEPAGE_TYPE,
            json!({
                "items": [{
                    "sys": {"id": "home", "type": "Entry"},
                    "fields": {
                        "title": "Keycaps",
                        "description": "Le catalogue",
                        "profileCards": [link("Entry", "p-mt3"), link("Entry", "p-cherry")]
                    }
                }],
                "includes": {
                    "Entry": [
                        profile_entry("p-cherry", "Cherry", "Uniforme"),
                        profile_entry("p-mt3", "MT3", "Sculpté")
                    ],
                    "Asset": [
                        asset("p-cherry-thumb", "//images.ctfassets.net/cherry.png"),
                        asset("p-mt3-thumb", "//images.ctfassets.net/mt3.png")
                    ]
                }
            }),
        );
        let adapter = ContentAdapter::new(store.clone());

        let home = adapter.get_home_page_information().await.unwrap();
        assert_eq!(home.title, "Keycaps");
        let cards: Vec<&str> = home.profile_cards.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(cards, vec!["mt3", "cherry"]);
        assert_eq!(
            home.profile_cards[0].thumbnail.as_deref(),
            Some("//images.ctfassets.net/mt3.png")
        );

        let queries = store.queries.lock().await;
        assert_eq!(queries[0].limit, Some(1));
        assert_eq!(queries[0].include, Some(2));
    }

    #[tokio::test]
    async fn test_home_page_missing_is_an_error() {
        let adapter = ContentAdapter::new(FixtureStore::default());

        assert!(matches!(
            adapter.get_home_page_information().await,
            Err(ContentError::MissingSingleton { .. })
        ));
    }

    #[tokio::test]
    async fn test_social_links_and_dropshipping_sites() {
        let store = FixtureStore::default()
            .with(
                SOCIAL_NETWORK_TYPE,
                json!({"items": [{
                    "sys": {"id": "s1", "type": "Entry"},
                    "fields": {"title": "Discord", "url": "https://discord.gg/x", "iconText": "message-circle"}
                }]}),
            )
            .with(
                DROPSHIPPING_TYPE,
                json!({
                    "items": [{
                        "sys": {"id": "d1", "type": "Entry"},
                        "fields": {
                            "title": "Cheap Keys",
                            "banner": link("Asset", "d1-banner"),
                            "url": "https://cheap.example.com",
                            "categories": ["Keycaps"]
                        }
                    }],
                    "includes": {"Asset": [asset("d1-banner", "https://images.ctfassets.net/d1.webp?w=800")]}
                }),
            );
        let adapter = ContentAdapter::new(store);

        let social = adapter.get_social_links_entries().await.unwrap();
        assert_eq!(social[0].icon_text, "message-circle");

        let sites = adapter.get_dropshipping_sites().await.unwrap();
        assert_eq!(sites[0].img, "https://images.ctfassets.net/d1.webp?w=800");
        assert_eq!(sites[0].categories, Some(vec!["Keycaps".to_string()]));
        assert_eq!(sites[0].examples, None);
    }

    fn og_images() -> Value {
        json!({
            "items": [
                {"sys": {"id": "o1", "type": "Entry"}, "fields": {"img": link("Asset", "og-1")}},
                {"sys": {"id": "o2", "type": "Entry"}, "fields": {"img": link("Asset", "og-2")}},
                {"sys": {"id": "o3", "type": "Entry"}, "fields": {"img": link("Asset", "og-3")}}
            ],
            "includes": {"Asset": [
                asset("og-1", "//images.ctfassets.net/og-1.png"),
                asset("og-2", "//images.ctfassets.net/og-2.png"),
                asset("og-3", "//images.ctfassets.net/og-3.png")
            ]}
        })
    }

    #[tokio::test]
    async fn test_random_og_image_reaches_every_entry() {
        let adapter = ContentAdapter::new(FixtureStore::default().with(OG_IMAGE_TYPE, og_images()));
        let mut rng = StdRng::seed_from_u64(7);

        let mut seen = HashSet::new();
        for _ in 0..100 {
            seen.insert(adapter.get_random_og_api_img_with(&mut rng).await.unwrap());
        }
        assert_eq!(seen.len(), 3);

        let url = adapter.get_random_og_api_img().await.unwrap();
        assert!(seen.contains(&url));
    }

    #[tokio::test]
    async fn test_random_og_image_without_entries_is_an_error() {
        let adapter = ContentAdapter::new(FixtureStore::default());

        assert!(matches!(
            adapter.get_random_og_api_img().await,
            Err(ContentError::EmptyCollection { .. })
        ));
    }

    #[tokio::test]
    async fn test_custom_date_format() {
        let adapter = ContentAdapter::with_display(
            FixtureStore::default().with(ARTICLE_TYPE, articles()),
            DisplayConfig {
                date_format: "%Y-%m-%d".to_string(),
            },
        );

        let articles = adapter.get_articles(Some("cherry")).await.unwrap();
        assert_eq!(articles[0].start_date.as_deref(), Some("2024-03-01"));
    }
}
