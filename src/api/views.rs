//! HTML rendering for the single-page interface

use askama::Template;

use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
    services::ViewState,
};

/// Detail panel contents for the active record
pub struct DetailView<'a> {
    pub movie: &'a MovieRecord,
    pub catalog_url: String,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    {% if loading %}<meta http-equiv="refresh" content="1" />{% endif %}
    <title>Movie Finder</title>
    <script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4"></script>
  </head>
  <body class="min-h-screen bg-gray-900 text-white flex flex-col items-center p-6">
    <h1 class="text-4xl font-bold text-yellow-400 mt-10 mb-6 text-center">Movie Finder</h1>

    <form method="post" action="/search" class="flex w-full max-w-xl mb-10 shadow-lg">
      <input type="text" name="query" value="{{ query }}" placeholder="Search for a movie..."
             class="flex-1 px-4 py-3 rounded-l-lg text-black focus:outline-none" />
      <button type="submit" class="bg-yellow-500 px-6 py-3 rounded-r-lg hover:bg-yellow-600 transition">Search</button>
    </form>

    {% if loading %}
    <div id="loading" class="flex justify-center items-center mt-10">
      <div class="w-12 h-12 border-4 border-yellow-400 border-dashed rounded-full animate-spin"></div>
    </div>
    {% endif %}

    {% if let Some(message) = error %}
    <p id="error" class="text-red-500 font-semibold text-xl text-center mt-10">{{ message }}</p>
    {% endif %}

    {% if let Some(detail) = detail %}
    <div id="detail" class="bg-gray-800 rounded-xl shadow-lg p-6 flex flex-col md:flex-row gap-6 max-w-4xl w-full mb-12">
      {% if let Some(poster) = detail.movie.poster %}
      <img src="{{ poster }}" alt="{{ detail.movie.title }}" class="w-64 h-auto rounded-lg shadow-md" />
      {% else %}
      <div class="w-64 h-96 rounded-lg bg-gray-700 flex items-center justify-center text-gray-400">No poster</div>
      {% endif %}
      <div class="flex-1">
        <h2 class="text-3xl font-bold mb-2">{{ detail.movie.title }}</h2>
        <p class="text-gray-400 italic mb-4">{{ detail.movie.year }} • {{ detail.movie.runtime }} • {{ detail.movie.rated }}</p>
        <p class="mb-3">{{ detail.movie.plot }}</p>
        <div class="grid grid-cols-2 gap-2 text-sm">
          <p><span class="font-semibold">Genre:</span> {{ detail.movie.genre }}</p>
          <p><span class="font-semibold">Director:</span> {{ detail.movie.director }}</p>
          <p><span class="font-semibold">Writer:</span> {{ detail.movie.writer }}</p>
          <p><span class="font-semibold">Actors:</span> {{ detail.movie.actors }}</p>
          <p><span class="font-semibold">Language:</span> {{ detail.movie.language }}</p>
          <p><span class="font-semibold">Country:</span> {{ detail.movie.country }}</p>
          <p><span class="font-semibold">Awards:</span> {{ detail.movie.awards }}</p>
          <p><span class="font-semibold">Box Office:</span> {{ detail.movie.box_office }}</p>
          <p><span class="font-semibold">Metascore:</span> {{ detail.movie.metascore }}</p>
          <p><span class="font-semibold">IMDB Rating:</span> {{ detail.movie.imdb_rating }}</p>
        </div>
        <a href="{{ detail.catalog_url }}" target="_blank" rel="noopener noreferrer"
           class="inline-block mt-4 text-yellow-400 hover:underline">View on IMDb →</a>
      </div>
    </div>
    {% endif %}

    {% if show_recommendations %}
    <div id="recommendations" class="w-full max-w-6xl">
      <h2 class="text-2xl font-bold mb-6 text-yellow-400">Recommended Movies</h2>
      <div class="grid grid-cols-2 sm:grid-cols-3 md:grid-cols-4 lg:grid-cols-5 gap-6">
        {% for rec in recommendations %}
        <form method="post" action="/movies/{{ rec.imdb_id }}">
          <button type="submit" class="w-full text-left bg-gray-800 rounded-lg shadow-md overflow-hidden hover:scale-105 transform transition cursor-pointer">
            {% if let Some(poster) = rec.poster %}
            <img src="{{ poster }}" alt="{{ rec.title }}" class="w-full h-72 object-cover" />
            {% else %}
            <div class="w-full h-72 bg-gray-700 flex items-center justify-center text-gray-400">No poster</div>
            {% endif %}
            <div class="p-3">
              <h3 class="text-sm font-semibold">{{ rec.title }}</h3>
              <p class="text-gray-400 text-xs">{{ rec.year }}</p>
            </div>
          </button>
        </form>
        {% endfor %}
      </div>
    </div>
    {% endif %}
  </body>
</html>"#,
    ext = "html"
)]
struct PageTemplate<'a> {
    query: &'a str,
    loading: bool,
    error: Option<&'static str>,
    detail: Option<DetailView<'a>>,
    show_recommendations: bool,
    recommendations: &'a [MovieRecord],
}

/// Renders the whole page for one snapshot of the interface
///
/// Exactly one of loading / error / detail is shown. The recommendation grid
/// is hidden while loading or when an error is displayed.
pub fn render_page(
    query: &str,
    view: &ViewState,
    recommendations: &[MovieRecord],
    imdb_title_url: &str,
) -> AppResult<String> {
    let template = PageTemplate {
        query,
        loading: view.is_loading(),
        error: view.error().map(|err| err.message()),
        detail: view.record().map(|movie| DetailView {
            movie,
            catalog_url: movie.catalog_url(imdb_title_url),
        }),
        show_recommendations: !view.is_loading() && view.error().is_none(),
        recommendations,
    };

    template
        .render()
        .map_err(|e| AppError::Internal(format!("Failed to render page: {}", e)))
}
