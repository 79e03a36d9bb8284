mod context_menu;
mod drafts;
mod explorer;
mod tabs;
