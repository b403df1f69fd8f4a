use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub dir: Vec3,
}

/// Perspective camera fixed on the scene origin.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    position: Vec3,
    view_proj: Mat4,
    inverse_view_proj: Mat4,
}

impl Camera {
    pub fn new(position: Vec3, fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let proj = Mat4::perspective_rh(fov_y_deg.to_radians(), aspect, near, far);
        let view = Mat4::look_at_rh(position, Vec3::ZERO, Vec3::Y);
        let view_proj = proj * view;
        Camera {
            position,
            view_proj,
            inverse_view_proj: view_proj.inverse(),
        }
    }

    /// Default viewing setup for the globe scene.
    pub fn with_aspect(aspect: f32) -> Self {
        Camera::new(Vec3::new(0.0, 0.0, 15.0), 75.0, aspect, 0.1, 1000.0)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn view_proj(&self) -> Mat4 {
        self.view_proj
    }

    /// Casts a ray from the camera through normalized device coordinates
    /// in [-1, 1], by unprojecting the near and far plane points.
    pub fn ray_from_ndc(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let near = self
            .inverse_view_proj
            .project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = self
            .inverse_view_proj
            .project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        Ray {
            origin: self.position,
            dir: (far - near).normalize_or_zero(),
        }
    }
}

/// Intersects a ray with an oriented box spanning `±half_extents` in its
/// local space; `world_from_local` carries the full transform, scale
/// included. Returns the world-space distance to the nearest hit in front
/// of the ray origin.
pub fn intersect_obb(ray: &Ray, world_from_local: Mat4, half_extents: Vec3) -> Option<f32> {
    let local_from_world = world_from_local.inverse();
    let origin = local_from_world.transform_point3(ray.origin);
    let dir = local_from_world.transform_vector3(ray.dir);

    // slab test per local axis
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let extent = half_extents[axis];
        if d.abs() < f32::EPSILON {
            if o.abs() > extent {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (-extent - o) * inv;
        let mut t1 = (extent - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }

    let t_local = if t_min >= 0.0 {
        t_min
    } else if t_max >= 0.0 {
        t_max
    } else {
        return None;
    };

    // distances along the local ray are not world distances under
    // non-uniform scale; measure from the world-space hit point
    let hit = world_from_local.transform_point3(origin + dir * t_local);
    Some(hit.distance(ray.origin))
}
